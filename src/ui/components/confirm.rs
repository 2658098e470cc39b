use rfd::{MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};

/// Gate in front of every destructive mutation. The mutation may only fire
/// when this returns true.
pub fn confirm_destructive(text: &str) -> bool {
    let result = MessageDialog::new()
        .set_level(MessageLevel::Warning)
        .set_title("Please confirm")
        .set_description(text)
        .set_buttons(MessageButtons::YesNo)
        .show();
    confirmation_accepted(&result)
}

/// Only an explicit Yes counts; dismissal and every other button are a no.
pub fn confirmation_accepted(result: &MessageDialogResult) -> bool {
    matches!(result, MessageDialogResult::Yes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_yes_is_accepted() {
        assert!(confirmation_accepted(&MessageDialogResult::Yes));
        assert!(!confirmation_accepted(&MessageDialogResult::No));
        assert!(!confirmation_accepted(&MessageDialogResult::Ok));
        assert!(!confirmation_accepted(&MessageDialogResult::Cancel));
        assert!(!confirmation_accepted(&MessageDialogResult::Custom(
            "whatever".to_string()
        )));
    }
}
