use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Sender {
    User,
    Assistant,
}

impl Sender {
    pub fn as_str(self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Assistant => "assistant",
        }
    }

    /// Role name used in chat completion payloads.
    pub fn to_api_role(self) -> &'static str {
        self.as_str()
    }

    pub fn is_user(self) -> bool {
        self == Sender::User
    }
}

impl TryFrom<&str> for Sender {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "user" => Ok(Sender::User),
            "assistant" => Ok(Sender::Assistant),
            _ => Err(format!("invalid sender: {value}")),
        }
    }
}

impl TryFrom<String> for Sender {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl From<Sender> for String {
    fn from(value: Sender) -> Self {
        value.as_str().to_string()
    }
}

/// One turn of the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub sender: Sender,
    pub text: String,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Assistant,
            text: text.into(),
        }
    }
}

/// Append-only transcript. Messages keep their arrival order and are never
/// edited or removed once pushed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageLog {
    messages: Vec<Message>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
    }

    pub fn as_slice(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }
}

impl<'a> IntoIterator for &'a MessageLog {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sender_round_trips_through_strings() {
        assert_eq!(Sender::try_from("user"), Ok(Sender::User));
        assert_eq!(Sender::try_from("assistant"), Ok(Sender::Assistant));
        assert!(Sender::try_from("system").is_err());
        assert_eq!(String::from(Sender::Assistant), "assistant");
    }

    #[test]
    fn log_preserves_arrival_order() {
        let mut log = MessageLog::new();
        log.append(Message::user("first"));
        log.append(Message::assistant("second"));
        log.append(Message::user("third"));

        let texts: Vec<&str> = log.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, ["first", "second", "third"]);
        assert_eq!(log.last().map(|m| m.sender), Some(Sender::User));
    }

    #[test]
    fn message_serializes_sender_as_role_string() {
        let json = serde_json::to_string(&Message::assistant("meh")).expect("serialize");
        assert_eq!(json, r#"{"sender":"assistant","text":"meh"}"#);
    }
}
