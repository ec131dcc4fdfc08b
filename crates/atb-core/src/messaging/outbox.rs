use std::borrow::Cow;

use crate::{
    formatting::truncate_chars,
    messaging::{port::MessagingPort, types::OutboundReply},
    Result,
};

/// Send dispatcher replies in order.
///
/// A failed image send falls back to a text message with the caption and the
/// same keyboard (broken image links are common in catalog data). Returns the
/// number of replies delivered; stops at the first reply that cannot be sent.
/// Text longer than the messenger's message limit is cut to fit.
pub async fn deliver_replies(
    messenger: &dyn MessagingPort,
    replies: &[OutboundReply],
) -> Result<usize> {
    let caps = messenger.capabilities();
    let mut delivered = 0usize;

    for reply in replies {
        let keyboard = if caps.supports_inline_keyboards {
            reply.keyboard.as_ref()
        } else {
            None
        };

        let text = fit_message(&reply.text, caps.max_message_len);
        let fits_caption = reply.text.chars().count() <= caps.max_caption_len;
        match reply.image_url.as_deref() {
            Some(url) if caps.supports_images && fits_caption => {
                if let Err(e) = messenger
                    .send_image(reply.chat_id, url, &reply.text, keyboard)
                    .await
                {
                    tracing::warn!(
                        chat_id = reply.chat_id.0,
                        error = %e,
                        "image send failed, falling back to text"
                    );
                    messenger.send_text(reply.chat_id, &text, keyboard).await?;
                }
            }
            _ => {
                messenger.send_text(reply.chat_id, &text, keyboard).await?;
            }
        }
        delivered += 1;
    }

    Ok(delivered)
}

fn fit_message(text: &str, max_chars: usize) -> Cow<'_, str> {
    if text.chars().count() <= max_chars {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(truncate_chars(text, max_chars.saturating_sub(3)))
    }
}
