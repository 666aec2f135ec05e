mod application;
mod ticket;
