use jokes_core::{Flags, Joke, JokeBody, JokeResponse};
use pretty_assertions::assert_eq;

const FLAGS: &str = r#"{"nsfw":false,"religious":false,"political":false,"racist":false,"sexist":false,"explicit":false}"#;

#[test]
fn single_joke_uses_provider_field_name() {
    let json = format!(
        r#"{{"category":"Programming","type":"single","joke":"It works on my machine.","flags":{FLAGS},"id":12,"safe":true,"lang":"en"}}"#
    );
    let joke: Joke = serde_json::from_str(&json).unwrap();
    assert_eq!(joke, Joke::single(12, "Programming", "It works on my machine."));
}

#[test]
fn single_joke_accepts_text_alias() {
    let json = format!(
        r#"{{"id":7,"category":"Pun","type":"single","text":"...","flags":{FLAGS},"safe":true,"lang":"en"}}"#
    );
    let joke: Joke = serde_json::from_str(&json).unwrap();
    assert_eq!(joke.body, JokeBody::Single { text: "...".to_string() });
}

#[test]
fn two_part_joke_with_one_part() {
    let json = format!(
        r#"{{"id":3,"category":"Misc","type":"twopart","setup":"Knock knock.","flags":{FLAGS},"safe":false,"lang":"de"}}"#
    );
    let joke: Joke = serde_json::from_str(&json).unwrap();
    assert_eq!(
        joke.body,
        JokeBody::TwoPart {
            setup: Some("Knock knock.".to_string()),
            delivery: None,
        }
    );
    assert!(!joke.safe);
    assert_eq!(joke.lang, "de");
}

#[test]
fn two_part_joke_without_parts_is_rejected() {
    let json = format!(
        r#"{{"id":3,"category":"Misc","type":"twopart","flags":{FLAGS},"safe":true,"lang":"en"}}"#
    );
    let err = serde_json::from_str::<Joke>(&json).unwrap_err();
    assert!(err.to_string().contains("requires a setup or a delivery"), "{err}");
}

#[test]
fn single_joke_without_text_is_rejected() {
    let json = format!(
        r#"{{"id":3,"category":"Misc","type":"single","setup":"x","flags":{FLAGS},"safe":true,"lang":"en"}}"#
    );
    assert!(serde_json::from_str::<Joke>(&json).is_err());
}

#[test]
fn unknown_type_is_rejected() {
    let json = format!(
        r#"{{"id":3,"category":"Misc","type":"limerick","joke":"x","flags":{FLAGS},"safe":true,"lang":"en"}}"#
    );
    let err = serde_json::from_str::<Joke>(&json).unwrap_err();
    assert!(err.to_string().contains("limerick"), "{err}");
}

#[test]
fn mistyped_field_is_rejected() {
    let json = format!(
        r#"{{"id":"3","category":"Misc","type":"single","joke":"x","flags":{FLAGS},"safe":true,"lang":"en"}}"#
    );
    assert!(serde_json::from_str::<Joke>(&json).is_err());
}

#[test]
fn flags_are_decoded() {
    let json = r#"{"id":1,"category":"Dark","type":"single","joke":"x","flags":{"nsfw":true,"religious":false,"political":true,"racist":false,"sexist":false,"explicit":false},"safe":false,"lang":"en"}"#;
    let joke: Joke = serde_json::from_str(json).unwrap();
    assert_eq!(
        joke.flags,
        Flags {
            nsfw: true,
            political: true,
            ..Flags::default()
        }
    );
}

#[test]
fn envelope_preserves_order() {
    let json = format!(
        r#"{{"error":false,"amount":2,"jokes":[
            {{"id":2,"category":"Pun","type":"single","joke":"b","flags":{FLAGS},"safe":true,"lang":"en"}},
            {{"id":1,"category":"Pun","type":"single","joke":"a","flags":{FLAGS},"safe":true,"lang":"en"}}
        ]}}"#
    );
    let response: JokeResponse = serde_json::from_str(&json).unwrap();
    assert_eq!(
        response,
        JokeResponse::from_jokes(vec![Joke::single(2, "Pun", "b"), Joke::single(1, "Pun", "a")])
    );
}
