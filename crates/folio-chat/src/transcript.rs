use futures::{Stream, StreamExt};

use crate::types::{ConversationMessage, ResponseChunk, Sender};

/// Running chat transcript built from streamed chunks
///
/// Text fragments are appended to the open assistant turn in delivery
/// order; a source batch is attached to that same turn.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<ConversationMessage>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_user(&mut self, text: impl Into<String>) -> &ConversationMessage {
        self.push(ConversationMessage::user(text))
    }

    /// Open an empty assistant turn for the chunks that follow
    pub fn begin_assistant(&mut self) -> &ConversationMessage {
        self.push(ConversationMessage::assistant(String::new()))
    }

    /// Fold one chunk into the current assistant turn, opening one if needed
    pub fn apply(&mut self, chunk: ResponseChunk) {
        if self.last().map(|m| m.sender) != Some(Sender::Assistant) {
            self.begin_assistant();
        }
        let Some(turn) = self.messages.last_mut() else {
            return;
        };

        match chunk {
            ResponseChunk::Text(text) => turn.text.push_str(&text),
            ResponseChunk::Sources(sources) => {
                turn.sources.get_or_insert_with(Vec::new).extend(sources)
            }
        }
    }

    /// Drain a response stream into a new assistant turn
    ///
    /// `on_chunk` sees every chunk before it is folded in, for progressive
    /// rendering.
    pub async fn record<S, F>(&mut self, stream: S, mut on_chunk: F) -> &ConversationMessage
    where
        S: Stream<Item = ResponseChunk>,
        F: FnMut(&ResponseChunk),
    {
        self.begin_assistant();

        let mut stream = Box::pin(stream);
        while let Some(chunk) = stream.next().await {
            on_chunk(&chunk);
            self.apply(chunk);
        }

        &self.messages[self.messages.len() - 1]
    }

    pub fn messages(&self) -> &[ConversationMessage] {
        &self.messages
    }

    pub fn last(&self) -> Option<&ConversationMessage> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    fn push(&mut self, message: ConversationMessage) -> &ConversationMessage {
        self.messages.push(message);
        &self.messages[self.messages.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GroundingSource;
    use futures::stream;

    #[test]
    fn test_apply_accumulates_into_one_turn() {
        let mut transcript = Transcript::new();
        transcript.push_user("Tell me about ETL");

        transcript.apply(ResponseChunk::text("Anmol has "));
        transcript.apply(ResponseChunk::text("built pipelines."));
        transcript.apply(ResponseChunk::Sources(vec![GroundingSource::new("https://a.example", "A")]));

        assert_eq!(transcript.len(), 2);
        let reply = transcript.last().unwrap();
        assert_eq!(reply.sender, Sender::Assistant);
        assert_eq!(reply.text, "Anmol has built pipelines.");
        assert_eq!(reply.sources.as_ref().unwrap().len(), 1);
    }

    #[test]
    fn test_new_user_turn_closes_assistant_turn() {
        let mut transcript = Transcript::new();
        transcript.apply(ResponseChunk::text("first"));
        transcript.push_user("again");
        transcript.apply(ResponseChunk::text("second"));

        let texts: Vec<_> = transcript.messages().iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "again", "second"]);
    }

    #[tokio::test]
    async fn test_record_stream() {
        let mut transcript = Transcript::new();
        transcript.push_user("hi");

        let chunks = vec![ResponseChunk::text("Hel"), ResponseChunk::text("lo")];
        let mut seen = Vec::new();
        let reply = transcript
            .record(stream::iter(chunks), |chunk| seen.push(chunk.clone()))
            .await
            .clone();

        assert_eq!(reply.text, "Hello");
        assert_eq!(reply.sources, None);
        assert_eq!(seen.len(), 2);
        assert_eq!(transcript.len(), 2);
    }
}
