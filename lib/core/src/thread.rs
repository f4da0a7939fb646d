use postline_auth::user::SessionUser;
use postline_utils::constants::COMMENTS_LOAD_FAILED_NOTIFICATION;
use postline_utils::errors::AppError;

use crate::cache::{CacheKey, CommentMutation};
use crate::comment::Comment;
use crate::notification::{NotificationKind, Notifications};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditSession {
    pub comment_id: i64,
    pub draft: String,
}

/// What the user is doing with the comments of the thread. The options menu and the edit session exclude each other.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Interaction {
    #[default]
    Idle,
    MenuOpen { comment_id: i64 },
    Editing(EditSession),
}

/// Transient state of a comment thread view
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommentThreadState {
    pub composer: String,
    pub interaction: Interaction,
}

/// Consequences of a finished mutation that the view must carry out
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MutationEffects {
    pub invalidated_keys: Vec<CacheKey>,
    pub notification: NotificationKind,
    pub generation: u64,
}

impl CommentThreadState {
    pub fn set_composer(&mut self, text: String) {
        self.composer = text;
    }

    /// Trimmed composer text, `None` if there is nothing to submit
    pub fn composer_submission(&self) -> Option<String> {
        non_blank(&self.composer)
    }

    pub fn clear_composer(&mut self) {
        self.composer.clear();
    }

    /// Opens the options menu of `comment_id`, or closes it if it was already open. Ignored during an edit.
    pub fn toggle_menu(&mut self, comment_id: i64) {
        let interaction = match &self.interaction {
            Interaction::Editing(_) => return,
            Interaction::MenuOpen { comment_id: open_id } if *open_id == comment_id => Interaction::Idle,
            _ => Interaction::MenuOpen { comment_id },
        };
        self.interaction = interaction;
    }

    pub fn close_menu(&mut self) {
        if matches!(self.interaction, Interaction::MenuOpen { .. }) {
            self.interaction = Interaction::Idle;
        }
    }

    pub fn menu_target(&self) -> Option<i64> {
        match self.interaction {
            Interaction::MenuOpen { comment_id } => Some(comment_id),
            _ => None,
        }
    }

    /// Enters edit mode for `comment`, only from its open options menu. Returns whether the edit started.
    pub fn start_edit(&mut self, comment: &Comment) -> bool {
        if self.menu_target() != Some(comment.id) {
            log::debug!("Ignore edit request of comment {}, its menu is not open.", comment.id);
            return false;
        }
        self.interaction = Interaction::Editing(EditSession {
            comment_id: comment.id,
            draft: comment.content.clone(),
        });
        true
    }

    pub fn set_edit_draft(&mut self, text: String) {
        if let Interaction::Editing(edit_session) = &mut self.interaction {
            edit_session.draft = text;
        }
    }

    /// Comment id and trimmed draft to save, `None` if not editing or if the draft is blank
    pub fn edit_submission(&self) -> Option<(i64, String)> {
        match &self.interaction {
            Interaction::Editing(edit_session) => non_blank(&edit_session.draft).map(|draft| (edit_session.comment_id, draft)),
            _ => None,
        }
    }

    pub fn cancel_edit(&mut self) {
        if self.is_editing() {
            self.interaction = Interaction::Idle;
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.interaction, Interaction::Editing(_))
    }

    pub fn editing_comment_id(&self) -> Option<i64> {
        match &self.interaction {
            Interaction::Editing(edit_session) => Some(edit_session.comment_id),
            _ => None,
        }
    }

    pub fn edit_draft(&self) -> Option<&str> {
        match &self.interaction {
            Interaction::Editing(edit_session) => Some(edit_session.draft.as_str()),
            _ => None,
        }
    }
}

fn non_blank(text: &str) -> Option<String> {
    match text.trim() {
        "" => None,
        text => Some(text.to_string()),
    }
}

/// Whether `user` wrote `comment` and may therefore edit or delete it
pub fn is_comment_author(comment: &Comment, user: Option<&SessionUser>) -> bool {
    user.is_some_and(|user| user.id == comment.user_id)
}

/// Updates the thread state and notifications once `mutation` completed with `result`
pub fn apply_mutation_result(
    mutation: CommentMutation,
    result: &Result<(), AppError>,
    post_id: i64,
    thread_state: &mut CommentThreadState,
    notifications: &mut Notifications,
) -> MutationEffects {
    let mutation_name: &'static str = mutation.into();
    match result {
        Ok(()) => {
            log::debug!("Comment mutation {mutation_name} succeeded on post {post_id}.");
            match mutation {
                CommentMutation::Create => thread_state.clear_composer(),
                CommentMutation::Update | CommentMutation::Delete => thread_state.interaction = Interaction::Idle,
            }
            let generation = notifications.show(NotificationKind::Success, mutation.success_message());
            MutationEffects {
                invalidated_keys: mutation.invalidated_keys(post_id),
                notification: NotificationKind::Success,
                generation,
            }
        },
        Err(e) => {
            log::error!("Comment mutation {mutation_name} failed on post {post_id}: {e}");
            if mutation == CommentMutation::Delete {
                thread_state.close_menu();
            }
            let generation = notifications.show(NotificationKind::Error, mutation.failure_message());
            MutationEffects {
                invalidated_keys: Vec::new(),
                notification: NotificationKind::Error,
                generation,
            }
        },
    }
}

/// Raises the error notification of a failed comment list fetch, returning its generation
pub fn apply_load_failure(error: &AppError, post_id: i64, notifications: &mut Notifications) -> u64 {
    log::error!("Failed to load comments of post {post_id}: {error}");
    notifications.show(NotificationKind::Error, COMMENTS_LOAD_FAILED_NOTIFICATION)
}

#[cfg(test)]
mod tests {
    use postline_auth::user::SessionUser;

    use crate::comment::Comment;
    use crate::thread::{is_comment_author, CommentThreadState, EditSession, Interaction};

    fn get_comment(id: i64, user_id: i64, content: &str) -> Comment {
        Comment { id, user_id, content: String::from(content), ..Default::default() }
    }

    #[test]
    fn test_composer_submission() {
        let mut thread_state = CommentThreadState::default();
        assert_eq!(thread_state.composer_submission(), None);
        thread_state.set_composer(String::from("   \n\t"));
        assert_eq!(thread_state.composer_submission(), None);
        thread_state.set_composer(String::from("  nice post \n"));
        assert_eq!(thread_state.composer_submission(), Some(String::from("nice post")));
        thread_state.clear_composer();
        assert_eq!(thread_state.composer, "");
    }

    #[test]
    fn test_toggle_menu() {
        let mut thread_state = CommentThreadState::default();
        thread_state.toggle_menu(1);
        assert_eq!(thread_state.menu_target(), Some(1));
        thread_state.toggle_menu(2);
        assert_eq!(thread_state.menu_target(), Some(2));
        thread_state.toggle_menu(2);
        assert_eq!(thread_state.menu_target(), None);
        assert_eq!(thread_state.interaction, Interaction::Idle);
    }

    #[test]
    fn test_close_menu_keeps_edit_session() {
        let mut thread_state = CommentThreadState::default();
        thread_state.toggle_menu(1);
        thread_state.close_menu();
        assert_eq!(thread_state.interaction, Interaction::Idle);

        let comment = get_comment(1, 1, "content");
        thread_state.toggle_menu(1);
        assert!(thread_state.start_edit(&comment));
        thread_state.close_menu();
        assert!(thread_state.is_editing());
    }

    #[test]
    fn test_start_edit() {
        let mut thread_state = CommentThreadState::default();
        let comment = get_comment(4, 1, "original");
        assert!(!thread_state.start_edit(&comment));
        assert!(!thread_state.is_editing());

        thread_state.toggle_menu(5);
        assert!(!thread_state.start_edit(&comment));
        assert_eq!(thread_state.menu_target(), Some(5));

        thread_state.toggle_menu(4);
        assert!(thread_state.start_edit(&comment));
        assert_eq!(
            thread_state.interaction,
            Interaction::Editing(EditSession { comment_id: 4, draft: String::from("original") })
        );
        assert_eq!(thread_state.menu_target(), None);
        assert_eq!(thread_state.editing_comment_id(), Some(4));
        assert_eq!(thread_state.edit_draft(), Some("original"));
    }

    #[test]
    fn test_menu_ignored_while_editing() {
        let mut thread_state = CommentThreadState::default();
        let comment = get_comment(4, 1, "original");
        thread_state.toggle_menu(4);
        thread_state.start_edit(&comment);
        thread_state.toggle_menu(6);
        assert_eq!(thread_state.menu_target(), None);
        assert_eq!(thread_state.editing_comment_id(), Some(4));
    }

    #[test]
    fn test_edit_submission_and_cancel() {
        let mut thread_state = CommentThreadState::default();
        assert_eq!(thread_state.edit_submission(), None);
        thread_state.set_edit_draft(String::from("ignored"));
        assert_eq!(thread_state.interaction, Interaction::Idle);

        let comment = get_comment(2, 1, "original");
        thread_state.toggle_menu(2);
        thread_state.start_edit(&comment);
        thread_state.set_edit_draft(String::from("  "));
        assert_eq!(thread_state.edit_submission(), None);
        thread_state.set_edit_draft(String::from(" updated "));
        assert_eq!(thread_state.edit_submission(), Some((2, String::from("updated"))));

        thread_state.cancel_edit();
        assert_eq!(thread_state.interaction, Interaction::Idle);
        assert_eq!(thread_state.edit_draft(), None);
    }

    #[test]
    fn test_is_comment_author() {
        let comment = get_comment(1, 10, "content");
        let author = SessionUser { id: 10, name: String::from("Ada"), profile_picture: None };
        let other_user = SessionUser { id: 11, name: String::from("Bob"), profile_picture: None };
        assert!(is_comment_author(&comment, Some(&author)));
        assert!(!is_comment_author(&comment, Some(&other_user)));
        assert!(!is_comment_author(&comment, None));
    }
}
