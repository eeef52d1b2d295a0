use chrono::Duration;

use crate::models::{Conversation, Turn};

/// Split turns into conversations wherever two neighbouring turns are more
/// than `conversation_gap` apart
///
/// An empty turn list yields no conversations.
pub fn segment_conversations(turns: Vec<Turn>, conversation_gap: Duration) -> Vec<Conversation> {
    let mut conversations = Vec::new();
    let mut open: Option<Conversation> = None;

    for turn in turns {
        open = Some(match open.take() {
            None => Conversation::new(turn),
            Some(mut conversation) => {
                if turn.timestamp - conversation.last().timestamp > conversation_gap {
                    conversations.push(conversation);
                    Conversation::new(turn)
                } else {
                    conversation.push(turn);
                    conversation
                }
            }
        });
    }

    conversations.extend(open);
    conversations
}
