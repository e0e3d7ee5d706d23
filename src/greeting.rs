use rand::Rng;
use serde_json::Value;

/// Salutations the bot rotates through, one per reply.
pub const GREETINGS: [&str; 3] = ["Hello", "Hola", "Bonjour"];

/// Name used when the sender carries nothing usable.
pub const FALLBACK_NAME: &str = "there";

/// Pull the most friendly sender name we can find from a Telegram message.
///
/// Consults `from.first_name`, `from.username`, `from.last_name` and
/// `from.language_code` in that order; empty or non-string values are
/// skipped. Anything malformed collapses to [`FALLBACK_NAME`].
pub fn extract_sender_name(message: &Value) -> String {
    let sender = match message.get("from") {
        Some(Value::Object(sender)) => sender,
        _ => return FALLBACK_NAME.to_string(),
    };

    ["first_name", "username", "last_name", "language_code"]
        .iter()
        .find_map(|key| {
            sender
                .get(*key)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
        })
        .unwrap_or(FALLBACK_NAME)
        .to_string()
}

/// Format a greeting in a randomly selected language, addressing the sender.
pub fn pick_greeting<R: Rng + ?Sized>(name: &str, rng: &mut R) -> String {
    let salutation = GREETINGS[rng.gen_range(0..GREETINGS.len())];
    let name = if name.is_empty() { FALLBACK_NAME } else { name };
    format!("{}, {}!", salutation, name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::json;

    #[test]
    fn test_extract_sender_name_prefers_first_name() {
        let message = json!({
            "from": {
                "first_name": "Pat",
                "username": "pat123",
                "last_name": "Smith",
                "language_code": "en"
            }
        });
        assert_eq!(extract_sender_name(&message), "Pat");
    }

    #[test]
    fn test_extract_sender_name_falls_back_to_username() {
        let message = json!({"from": {"username": "botfan"}});
        assert_eq!(extract_sender_name(&message), "botfan");
    }

    #[test]
    fn test_extract_sender_name_falls_back_to_last_name_then_language_code() {
        let message = json!({"from": {"last_name": "Jones", "language_code": "fr"}});
        assert_eq!(extract_sender_name(&message), "Jones");

        let message = json!({"from": {"language_code": "fr"}});
        assert_eq!(extract_sender_name(&message), "fr");
    }

    #[test]
    fn test_extract_sender_name_skips_empty_and_non_string_values() {
        let message = json!({"from": {"first_name": "", "username": 42, "last_name": "Reyes"}});
        assert_eq!(extract_sender_name(&message), "Reyes");
    }

    #[test]
    fn test_extract_sender_name_defaults_without_sender() {
        assert_eq!(extract_sender_name(&json!({})), FALLBACK_NAME);
        assert_eq!(extract_sender_name(&json!({"from": null})), FALLBACK_NAME);
        assert_eq!(
            extract_sender_name(&json!({"from": "not-an-object"})),
            FALLBACK_NAME
        );
        assert_eq!(extract_sender_name(&json!({"from": {}})), FALLBACK_NAME);
    }

    #[test]
    fn test_pick_greeting_is_deterministic_for_a_fixed_seed() {
        let mut first = StdRng::seed_from_u64(7);
        let mut second = StdRng::seed_from_u64(7);
        assert_eq!(
            pick_greeting("Sam", &mut first),
            pick_greeting("Sam", &mut second)
        );
    }

    #[test]
    fn test_pick_greeting_uses_a_known_salutation_and_formats_name() {
        let mut rng = StdRng::seed_from_u64(0);
        for _ in 0..50 {
            let greeting = pick_greeting("Sam", &mut rng);
            let salutation = greeting
                .split(',')
                .next()
                .expect("greeting contains a comma");
            assert!(GREETINGS.contains(&salutation), "unexpected: {}", greeting);
            assert!(greeting.ends_with(", Sam!"));
        }
    }

    #[test]
    fn test_pick_greeting_defaults_name_when_empty() {
        let mut rng = StdRng::seed_from_u64(1);
        let greeting = pick_greeting("", &mut rng);
        assert!(greeting.ends_with(", there!"));
    }
}
