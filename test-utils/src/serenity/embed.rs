//! Test factory for creating Serenity Embed objects.

use serenity::all::Embed;

/// Creates a test Serenity Embed with the given title and fields.
///
/// # Arguments
/// - `title` - Embed title
/// - `fields` - `(name, value)` pairs, none of them inline
///
/// # Returns
/// - `Embed` - A valid Serenity Embed struct for testing
///
/// # Panics
/// - If the JSON cannot be deserialized into an Embed (indicates invalid test data)
pub fn create_test_embed(title: &str, fields: &[(&str, &str)]) -> Embed {
    let fields: Vec<serde_json::Value> = fields
        .iter()
        .map(|(name, value)| {
            serde_json::json!({
                "name": name,
                "value": value,
                "inline": false,
            })
        })
        .collect();

    serde_json::from_value(serde_json::json!({
        "type": "rich",
        "title": title,
        "fields": fields,
    }))
    .expect("Failed to create test embed - invalid JSON structure")
}
