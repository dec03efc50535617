use validator::Validate;

use crate::error::Result;

/// Form fields posted by the telephony provider for an inbound SMS. Only
/// `Body` is used; the provider sends many more which are ignored.
#[derive(Debug, Default, Validate)]
pub struct InboundSmsForm {
    #[validate(
        required(message = "Expected a Body, didn't get one"),
        length(min = 1, message = "Expected a Body, didn't get one")
    )]
    pub body: Option<String>,
    pub from: Option<String>,
}

impl InboundSmsForm {
    /// Decodes a urlencoded body. A repeated field keeps its first value.
    pub fn from_urlencoded(raw: &[u8]) -> Result<Self> {
        let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(raw)?;

        let mut form = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "Body" => &mut form.body,
                "From" => &mut form.from,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        Ok(form)
    }
}
