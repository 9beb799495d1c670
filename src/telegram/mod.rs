//! Telegram transport adapter
//!
//! Bridges the transport-agnostic engine to Telegram: inbound updates are
//! converted into `Interaction` events, outbound messages and menus are
//! rendered as Telegram messages with inline keyboards.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, Message};

use crate::engine::Interaction;
use crate::presentation::{Menu, PresentationSink};
use crate::state::flows::FlowKind;
use crate::utils::errors::Result;

/// Presentation sink backed by a Telegram bot.
///
/// Conversations are private chats, so the chat id is the user id.
#[derive(Debug, Clone)]
pub struct TelegramSink {
    bot: Bot,
}

impl TelegramSink {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl PresentationSink for TelegramSink {
    async fn send(&self, user_id: i64, text: &str, menu: Option<Menu>) -> Result<()> {
        let request = self.bot.send_message(ChatId(user_id), text);
        match menu {
            Some(menu) => {
                request.reply_markup(keyboard_from_menu(&menu)).await?;
            }
            None => {
                request.await?;
            }
        }
        Ok(())
    }
}

/// Render a menu as an inline keyboard, one button per item.
pub fn keyboard_from_menu(menu: &Menu) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(menu.rows.iter().map(|row| {
        row.iter()
            .map(|item| InlineKeyboardButton::callback(item.label.clone(), item.token.clone()))
            .collect::<Vec<_>>()
    }))
}

/// Convert an inbound Telegram message into an engine interaction.
///
/// Returns `None` for messages without a sender or without text (stickers,
/// photos and the like are not form input).
pub fn interaction_from_message(msg: &Message) -> Option<Interaction> {
    let user = msg.from.as_ref()?;
    let text = msg.text()?;
    Some(Interaction::message(user.id.0 as i64, text))
}

/// Parse a main-menu callback token into the flow it starts.
pub fn flow_from_token(data: &str) -> Option<FlowKind> {
    match data {
        "flow:add" => Some(FlowKind::Add),
        "flow:edit" => Some(FlowKind::Edit),
        "flow:del" => Some(FlowKind::Delete),
        "flow:find_by_name" => Some(FlowKind::FindByName),
        "flow:find_by_grade" => Some(FlowKind::FindByGrade),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::{main_menu, MenuItem};

    #[test]
    fn test_keyboard_preserves_rows() {
        let menu = Menu::new(vec![
            vec![MenuItem::new("Yes", "delete:confirm"), MenuItem::new("No", "delete:cancel")],
            vec![MenuItem::new("Help", "menu:help")],
        ]);

        let keyboard = keyboard_from_menu(&menu);
        assert_eq!(keyboard.inline_keyboard.len(), 2);
        assert_eq!(keyboard.inline_keyboard[0].len(), 2);
        assert_eq!(keyboard.inline_keyboard[1].len(), 1);
    }

    #[test]
    fn test_main_menu_tokens_map_to_flows() {
        for row in main_menu().rows {
            for item in row {
                if item.token.starts_with("flow:") {
                    assert!(flow_from_token(&item.token).is_some(), "unmapped token {}", item.token);
                }
            }
        }
        assert_eq!(flow_from_token("flow:del"), Some(FlowKind::Delete));
        assert_eq!(flow_from_token("menu:help"), None);
    }
}
