//! Localized message catalogue for the application intake conversation.
//!
//! Every user-facing intake string is a [`Msg`] variant with one template per
//! [`Language`]. Templates may reference values from the closed [`Placeholder`]
//! table; [`render`] substitutes them textually and leaves anything else untouched.

use crate::model::intake::Language;

/// Values a template may reference by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    Rank,
    Status,
    Channel,
    User,
    Name,
    Game,
    Role,
    Error,
    Link,
    Phrase,
}

impl Placeholder {
    const ALL: [Placeholder; 10] = [
        Placeholder::Rank,
        Placeholder::Status,
        Placeholder::Channel,
        Placeholder::User,
        Placeholder::Name,
        Placeholder::Game,
        Placeholder::Role,
        Placeholder::Error,
        Placeholder::Link,
        Placeholder::Phrase,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::Rank => "rank",
            Self::Status => "status",
            Self::Channel => "channel",
            Self::User => "user",
            Self::Name => "name",
            Self::Game => "game",
            Self::Role => "role",
            Self::Error => "error",
            Self::Link => "link",
            Self::Phrase => "phrase",
        }
    }

    fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.key() == key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Msg {
    LanguageTitle,
    LanguageDescription,
    LanguageFooter,
    GameTitle,
    GameDescription,
    SelectionFooter,
    RegionTitle,
    RegionDescription,
    RegionNa,
    RegionEu,
    RegionBr,
    GameUnavailable,
    SpecialDisabled,
    IdentityModalTitle,
    IdentityModalLabel,
    IdentityExpired,
    RankRejected,
    RankLookupFailed,
    SubmitRejected,
    SubmitError,
    ChannelCreating,
    ChannelCreated,
    ChannelFailed,
    WelcomeTitle,
    WelcomeBody,
    StartButton,
    NotYourButton,
    AskName,
    NameTimeout,
    NameSaved,
    NameUpdateFailed,
    TermsPrompt,
    TermsAccepted,
    TermsUpdateFailed,
}

/// Phrase applicants must type to accept the legal terms.
pub fn terms_phrase(lang: Language) -> &'static str {
    match lang {
        Language::En => "I confirm that I read and I Agree to the ICA Terms",
        Language::Pt => "Confirmo que li e estou de acordo com os Termos da ICA",
    }
}

/// Link to the legal document applicants agree to.
pub fn terms_link(lang: Language) -> &'static str {
    match lang {
        Language::En => "https://docs.google.com/document/d/1HZDwFAPJsr3Kn7h64egAkv2LTIPzExWXto3BzCVm0Fo/edit?usp=sharing",
        Language::Pt => "https://docs.google.com/document/d/1Tqeb_CKJhT4k8DCdBWlEbQskL2GrjbEVqq5Q7Bq49p4/edit?usp=sharing",
    }
}

fn template(lang: Language, msg: Msg) -> &'static str {
    use Language::{En, Pt};

    match (msg, lang) {
        (Msg::LanguageTitle, _) => "🌐 Select Your Language | Selecione Seu Idioma",
        (Msg::LanguageDescription, _) => "Please select your preferred language for the application process.\n\nPor favor, selecione o idioma de sua preferência para o processo de inscrição.",
        (Msg::LanguageFooter, _) => "Make your selection below | Faça sua seleção abaixo.",
        (Msg::GameTitle, En) => "🎮 Select Your Game",
        (Msg::GameTitle, Pt) => "🎮 Selecione Seu Jogo",
        (Msg::GameDescription, En) => "Please select the game you want to apply for.",
        (Msg::GameDescription, Pt) => "Por favor, selecione o jogo para o qual deseja se inscrever.",
        (Msg::SelectionFooter, En) => "Make your selection below.",
        (Msg::SelectionFooter, Pt) => "Faça sua seleção abaixo.",
        (Msg::RegionTitle, En) => "🌍 Select Your Region for {game}",
        (Msg::RegionTitle, Pt) => "🌍 Selecione Sua Região para {game}",
        (Msg::RegionDescription, En) => "Please select the region you are applying from for {game}.",
        (Msg::RegionDescription, Pt) => "Por favor, selecione a região de onde você está se inscrevendo para {game}.",
        (Msg::RegionNa, En) => "North America (NA)",
        (Msg::RegionNa, Pt) => "América do Norte (NA)",
        (Msg::RegionEu, En) => "Europe (EU)",
        (Msg::RegionEu, Pt) => "Europa (EU)",
        (Msg::RegionBr, En) => "Brazil (BR)",
        (Msg::RegionBr, Pt) => "Brasil (BR)",
        (Msg::GameUnavailable, En) => "Applications for {game} are not open yet.",
        (Msg::GameUnavailable, Pt) => "As inscrições para {game} ainda não estão abertas.",
        (Msg::SpecialDisabled, _) => "This feature is currently disabled.",
        (Msg::IdentityModalTitle, En) => "Please enter your user#tag",
        (Msg::IdentityModalTitle, Pt) => "Por favor, insira seu user#tag",
        (Msg::IdentityModalLabel, En) => "Riot ID (user#tag)",
        (Msg::IdentityModalLabel, Pt) => "Riot ID (usuário#tag)",
        (Msg::IdentityExpired, En) => "Time expired for submitting the response.",
        (Msg::IdentityExpired, Pt) => "Tempo esgotado para enviar a resposta.",
        (Msg::RankRejected, En) => "Your rank is {rank}, it doesn't meet our requirements.",
        (Msg::RankRejected, Pt) => "Seu rank é {rank}, não atende aos nossos requisitos.",
        (Msg::RankLookupFailed, En) => "Error fetching rank. Please try again later.",
        (Msg::RankLookupFailed, Pt) => "Erro ao buscar o rank. Tente novamente mais tarde.",
        (Msg::SubmitRejected, En) => "Could not create your application. API responded with status: {status}",
        (Msg::SubmitRejected, Pt) => "Não foi possível criar sua inscrição. Resposta da API: {status}",
        (Msg::SubmitError, En) => "Failed to create your application via API: {error}",
        (Msg::SubmitError, Pt) => "Falha ao criar sua inscrição na API: {error}",
        (Msg::ChannelCreating, En) => "Creating your application, this process might take a few seconds.",
        (Msg::ChannelCreating, Pt) => "Criando sua inscrição, este processo pode levar alguns segundos.",
        (Msg::ChannelCreated, En) => "The application channel has been successfully created! {channel}",
        (Msg::ChannelCreated, Pt) => "O canal de inscrição foi criado com sucesso! {channel}",
        (Msg::ChannelFailed, En) => "Could not create your application channel. Your application was withdrawn, please try again later.",
        (Msg::ChannelFailed, Pt) => "Não foi possível criar seu canal de inscrição. Sua inscrição foi retirada, tente novamente mais tarde.",
        (Msg::WelcomeTitle, En) => "Booster Application - {game}",
        (Msg::WelcomeTitle, Pt) => "Inscrição para Booster - {game}",
        (Msg::WelcomeBody, En) => "Thanks for your application {user}\nPlease follow my instructions in the next steps.\n\nShare only accurate and true information.\nLet's Start",
        (Msg::WelcomeBody, Pt) => "Muito obrigado pelo seu interesse em fazer parte da equipe, {user}!\nPor favor, siga as instruções do bot nas próximas etapas e lembre-se de inserir apenas informações verdadeiras!\n\nVamos começar",
        (Msg::StartButton, En) => "Start",
        (Msg::StartButton, Pt) => "Começar",
        (Msg::NotYourButton, En) => "This button is not for you.",
        (Msg::NotYourButton, Pt) => "Este botão não é para você.",
        (Msg::AskName, En) => "**Greetings, {user}**\nLooks like you meet our minimum requirements...\nCan you let me know your **FULL NAME?**",
        (Msg::AskName, Pt) => "**Saudações, {user}**\nParece que você cumpre os requisitos mínimos...\nPosso saber seu **NOME COMPLETO?**",
        (Msg::NameTimeout, En) => "Time is up! You did not provide your full name.",
        (Msg::NameTimeout, Pt) => "Tempo esgotado! Você não forneceu seu nome completo.",
        (Msg::NameSaved, En) => "**{name}**! Thank you. Let's proceed to the next step...",
        (Msg::NameSaved, Pt) => "**{name}**! Obrigado. Vamos para a próxima etapa...",
        (Msg::NameUpdateFailed, En) => "Error updating custom name. Please try again.",
        (Msg::NameUpdateFailed, Pt) => "Erro ao atualizar o nome personalizado. Por favor, tente novamente.",
        (Msg::TermsPrompt, En) => "Nice name... now let's talk a bit about legal things.\nHere is the link: {link}\nIf you agree to all the terms, please type:\n```{phrase}```",
        (Msg::TermsPrompt, Pt) => "Nice name... agora vamos falar de assuntos legais.\nAqui está o link: {link}\nSe você concorda com todos os termos, por favor digite:\n```{phrase}```",
        (Msg::TermsAccepted, En) => "All right, my job here is done! Now I will connect you with a {role}, please wait.",
        (Msg::TermsAccepted, Pt) => "Tudo certo, meu trabalho aqui está feito! Agora vou te conectar com um {role}, por favor aguarde.",
        (Msg::TermsUpdateFailed, En) => "Error updating terms agreement. Please try again.",
        (Msg::TermsUpdateFailed, Pt) => "Erro ao atualizar os termos. Por favor, tente novamente.",
    }
}

/// Renders a catalogue entry, substituting the provided placeholder values.
///
/// Placeholders not present in `args`, and brace groups that are not placeholder
/// names at all, are left verbatim. Substituted values are never re-scanned.
pub fn render(lang: Language, msg: Msg, args: &[(Placeholder, &str)]) -> String {
    substitute(template(lang, msg), args)
}

fn substitute(template: &str, args: &[(Placeholder, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let value = after.find('}').and_then(|close| {
            let key = &after[..close];
            Placeholder::from_key(key)
                .and_then(|p| args.iter().find(|(arg, _)| *arg == p))
                .map(|(_, value)| (close, *value))
        });

        match value {
            Some((close, value)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);

    out
}
