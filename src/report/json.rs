use chrono::Utc;
use serde::Serialize;

#[derive(Serialize)]
struct Envelope<'a, T: Serialize> {
    tool: &'static str,
    version: &'static str,
    generated_at: String,
    fiscal_year: Option<i32>,
    #[serde(flatten)]
    payload: &'a T,
}

pub fn to_json<T: Serialize>(
    payload: &T,
    fiscal_year: Option<i32>,
) -> Result<String, serde_json::Error> {
    let envelope = Envelope {
        tool: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        generated_at: Utc::now().to_rfc3339(),
        fiscal_year,
        payload,
    };
    serde_json::to_string_pretty(&envelope)
}
