#![allow(dead_code)]

use std::sync::Once;

use jokes_engine::{ClientSettings, ReqwestJokeClient};

pub const FLAGS: &str = r#"{"nsfw":false,"religious":false,"political":false,"racist":false,"sexist":false,"explicit":false}"#;

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(jokes_logging::initialize_for_tests);
}

pub fn single_json(id: u64, text: &str) -> String {
    format!(
        r#"{{"category":"Pun","type":"single","joke":"{text}","flags":{FLAGS},"id":{id},"safe":true,"lang":"en"}}"#
    )
}

pub fn envelope_json(jokes: &[String]) -> String {
    format!(
        r#"{{"error":false,"amount":{},"jokes":[{}]}}"#,
        jokes.len(),
        jokes.join(",")
    )
}

pub fn client_for(base_url: &str) -> ReqwestJokeClient {
    ReqwestJokeClient::new(ClientSettings {
        base_url: base_url.to_string(),
        ..ClientSettings::default()
    })
    .expect("client")
}
