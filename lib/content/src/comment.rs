use leptos::prelude::*;
use leptos_router::components::A;

use postline_auth::user::{SessionUser, UserState};
use postline_core::cache::{CacheKey, CommentMutation, QueryCache};
use postline_core::comment::{get_post_comments, Comment, CreateComment, DeleteComment, EditComment};
use postline_core::notification::Notifications;
use postline_core::state::GlobalState;
use postline_core::notification::NotificationKind;
use postline_core::thread::{apply_load_failure, apply_mutation_result, is_comment_author, CommentThreadState};
use postline_utils::constants::{COMMENTS_LOAD_FAILED_MESSAGE, COMPOSER_PLACEHOLDER, NO_COMMENTS_MESSAGE};
use postline_utils::errors::AppError;
use postline_utils::icons::{DeleteIcon, EditIcon, LoadingIcon};
use postline_utils::routes::get_profile_path;
use postline_utils::widget::{AvatarWidget, DotMenu, TimestampWidget};

use crate::notification::NotificationToasts;

/// Reactive handles shared by the components of a comment thread
#[derive(Copy, Clone)]
pub struct CommentThreadContext {
    pub post_id: Signal<i64>,
    pub query_cache: QueryCache,
    pub thread_state: RwSignal<CommentThreadState>,
    pub notifications: RwSignal<Notifications>,
    pub session_user: Signal<Option<SessionUser>>,
    pub create_comment_action: ServerAction<CreateComment>,
    pub edit_comment_action: ServerAction<EditComment>,
    pub delete_comment_action: ServerAction<DeleteComment>,
}

impl CommentThreadContext {
    pub fn new(post_id: Signal<i64>, query_cache: QueryCache, session_user: Signal<Option<SessionUser>>) -> Self {
        CommentThreadContext {
            post_id,
            query_cache,
            thread_state: RwSignal::new(CommentThreadState::default()),
            notifications: RwSignal::new(Notifications::default()),
            session_user,
            create_comment_action: ServerAction::<CreateComment>::new(),
            edit_comment_action: ServerAction::<EditComment>::new(),
            delete_comment_action: ServerAction::<DeleteComment>::new(),
        }
    }

    /// Applies the outcome of a comment mutation to the view: thread state, notifications, stale caches and
    /// auto-dismiss timer.
    fn handle_mutation_result(&self, mutation: CommentMutation, result: Result<(), AppError>) {
        let mut thread_state = self.thread_state.get_untracked();
        let mut notifications = self.notifications.get_untracked();
        let effects = apply_mutation_result(
            mutation,
            &result,
            self.post_id.get_untracked(),
            &mut thread_state,
            &mut notifications,
        );
        self.thread_state.set(thread_state);
        self.notifications.set(notifications);
        self.query_cache.invalidate(&effects.invalidated_keys);
        self.schedule_dismiss(effects.notification, effects.generation);
    }

    fn handle_load_failure(&self, error: &AppError) {
        let post_id = self.post_id.get_untracked();
        let mut generation = 0;
        self.notifications.update(|notifications| {
            generation = apply_load_failure(error, post_id, notifications);
        });
        self.schedule_dismiss(NotificationKind::Error, generation);
    }

    /// Hides the notification of `kind` after its duration, unless a newer one replaced it
    fn schedule_dismiss(&self, kind: NotificationKind, generation: u64) {
        let notification_signal = self.notifications;
        set_timeout(
            move || notification_signal.update(|notifications| {
                notifications.channel_mut(kind).expire(generation);
            }),
            kind.auto_hide_duration(),
        );
    }
}

/// Comment section of a post: comment list, composer for the session user and notifications
#[component]
pub fn CommentSection(
    #[prop(into)]
    post_id: Signal<i64>,
) -> impl IntoView {
    let query_cache = expect_context::<GlobalState>().query_cache;
    let user_state = expect_context::<UserState>();
    let session_user = Signal::derive(move || match &(*user_state.user.read()) {
        Some(Ok(Some(user))) => Some(user.clone()),
        _ => None,
    });
    let thread_context = CommentThreadContext::new(post_id, query_cache, session_user);
    provide_context(thread_context);

    let comments_resource = Resource::new(
        move || {
            let post_id = post_id.get();
            (post_id, query_cache.version(CacheKey::PostComments(post_id)))
        },
        |(post_id, _)| get_post_comments(post_id),
    );

    for (mutation, action_value) in [
        (CommentMutation::Create, thread_context.create_comment_action.value()),
        (CommentMutation::Update, thread_context.edit_comment_action.value()),
        (CommentMutation::Delete, thread_context.delete_comment_action.value()),
    ] {
        Effect::new(move |_| {
            if let Some(result) = action_value.get() {
                thread_context.handle_mutation_result(mutation, result);
            }
        });
    }

    Effect::new(move |_| {
        if let Some(Err(e)) = comments_resource.get() {
            thread_context.handle_load_failure(&e);
        }
    });

    view! {
        <div class="flex flex-col gap-3 w-full">
            <Transition>
            {
                move || Suspend::new(async move {
                    match user_state.user.await {
                        Ok(Some(user)) => view! { <CommentComposer user/> }.into_any(),
                        Ok(None) => ().into_any(),
                        Err(e) => {
                            log::error!("Failed to load session user: {e}");
                            ().into_any()
                        },
                    }
                })
            }
            </Transition>
            <Transition fallback=move || view! { <LoadingIcon/> }>
            {
                move || Suspend::new(async move {
                    match comments_resource.await {
                        Ok(comments) if comments.is_empty() => view! {
                            <p class="text-center text-sm text-base-content/60 py-4">{NO_COMMENTS_MESSAGE}</p>
                        }.into_any(),
                        Ok(comments) => view! { <CommentList comments/> }.into_any(),
                        Err(_) => view! {
                            <p class="text-center text-error py-4">{COMMENTS_LOAD_FAILED_MESSAGE}</p>
                        }.into_any(),
                    }
                })
            }
            </Transition>
            <NotificationToasts notifications=thread_context.notifications/>
        </div>
    }
}

/// Input to publish a new comment as `user`
#[component]
pub fn CommentComposer(
    user: SessionUser,
) -> impl IntoView {
    let thread_context = expect_context::<CommentThreadContext>();
    let thread_state = thread_context.thread_state;
    let create_comment_action = thread_context.create_comment_action;

    let is_pending = create_comment_action.pending();
    let is_submit_disabled = Signal::derive(
        move || is_pending.get() || thread_state.read().composer_submission().is_none()
    );

    let submit = move || {
        if is_pending.get_untracked() {
            return;
        }
        let submission = thread_state.read_untracked().composer_submission();
        if let Some(content) = submission {
            create_comment_action.dispatch(CreateComment {
                post_id: thread_context.post_id.get_untracked(),
                content,
            });
        }
    };

    let avatar_url = user.profile_picture.clone();

    view! {
        <form
            class="flex gap-2 items-start w-full"
            on:submit=move |ev| {
                ev.prevent_default();
                submit();
            }
        >
            <AvatarWidget avatar_url=Signal::derive(move || avatar_url.clone()) class="h-10 w-10"/>
            <textarea
                class="textarea textarea-bordered grow min-h-10"
                rows=1
                placeholder=COMPOSER_PLACEHOLDER
                aria-label=COMPOSER_PLACEHOLDER
                prop:value=move || thread_state.read().composer.clone()
                on:input=move |ev| thread_state.update(|thread_state| thread_state.set_composer(event_target_value(&ev)))
            />
            <button
                type="submit"
                class="button-primary"
                disabled=is_submit_disabled
            >
                { move || match is_pending.get() {
                    true => "Posting...",
                    false => "Post",
                }}
            </button>
        </form>
    }
}

/// List of comments, rendered in the order received
#[component]
pub fn CommentList(
    comments: Vec<Comment>,
) -> impl IntoView {
    view! {
        <ul class="flex flex-col gap-2">
            <For
                each= move || comments.clone()
                key=comment_row_key
                children=move |comment| view! { <CommentItem comment/> }
            />
        </ul>
    }
}

/// Identifies a rendered comment row, an edited comment gets a new row
fn comment_row_key(comment: &Comment) -> (i64, String) {
    (comment.id, comment.content.clone())
}

/// Single comment with its author, timestamp, content and, for its author, the options menu
#[component]
pub fn CommentItem(
    comment: Comment,
) -> impl IntoView {
    let thread_context = expect_context::<CommentThreadContext>();
    let thread_state = thread_context.thread_state;
    let comment_id = comment.id;
    let author_id = comment.user_id;
    let profile_path = get_profile_path(author_id);
    let avatar_url = comment.user_profile_picture.clone();
    let display_name = comment.display_name().to_string();
    let handle = comment.handle();
    let created_at = comment.created_at;
    let content = comment.content.clone();
    let comment = StoredValue::new(comment);

    let is_author = Signal::derive(
        move || thread_context.session_user.with(|user| comment.with_value(|comment| is_comment_author(comment, user.as_ref())))
    );
    let is_editing = Signal::derive(move || thread_state.read().editing_comment_id() == Some(comment_id));

    view! {
        <li class="flex gap-2 p-2 rounded-sm bg-base-200">
            <A href=profile_path.clone() attr:class="shrink-0">
                <AvatarWidget avatar_url=Signal::derive(move || avatar_url.clone())/>
            </A>
            <div class="flex flex-col gap-1 grow min-w-0">
                <div class="flex justify-between items-start gap-2">
                    <div class="flex flex-wrap items-baseline gap-x-2">
                        <A href=profile_path attr:class="font-semibold hover:underline">
                            {display_name}
                        </A>
                        {handle.map(|handle| view! { <span class="text-sm text-base-content/60">{handle}</span> })}
                        <TimestampWidget timestamp=Signal::derive(move || created_at)/>
                    </div>
                    <Show when=move || is_author.get() && !thread_state.read().is_editing()>
                        <CommentOptionsMenu comment/>
                    </Show>
                </div>
                <Show
                    when=is_editing
                    fallback=move || view! { <p class="whitespace-pre-line wrap-break-word">{content.clone()}</p> }
                >
                    <EditCommentForm comment_id/>
                </Show>
            </div>
        </li>
    }
}

/// Options menu to edit or delete a comment
#[component]
pub fn CommentOptionsMenu(
    comment: StoredValue<Comment>,
) -> impl IntoView {
    let thread_context = expect_context::<CommentThreadContext>();
    let thread_state = thread_context.thread_state;
    let delete_comment_action = thread_context.delete_comment_action;
    let comment_id = comment.with_value(|comment| comment.id);

    let show_menu = Signal::derive(move || thread_state.read().menu_target() == Some(comment_id));
    let on_toggle = Callback::new(move |_: ()| thread_state.update(|thread_state| thread_state.toggle_menu(comment_id)));
    let on_dismiss = Callback::new(move |_: ()| thread_state.update(|thread_state| thread_state.close_menu()));

    view! {
        <DotMenu show_menu on_toggle on_dismiss>
            <button
                type="button"
                class="flex items-center gap-2 px-2 py-1 rounded-sm hover:bg-base-content/20"
                on:click=move |_| thread_state.update(|thread_state| {
                    comment.with_value(|comment| thread_state.start_edit(comment));
                })
            >
                <EditIcon/>
                "Edit"
            </button>
            <button
                type="button"
                class="flex items-center gap-2 px-2 py-1 rounded-sm hover:bg-base-content/20 text-error"
                disabled=move || delete_comment_action.pending().get()
                on:click=move |_| {
                    delete_comment_action.dispatch(DeleteComment { comment_id });
                }
            >
                <DeleteIcon/>
                "Delete"
            </button>
        </DotMenu>
    }
}

/// Inline form to edit the content of a comment
#[component]
pub fn EditCommentForm(
    comment_id: i64,
) -> impl IntoView {
    let thread_context = expect_context::<CommentThreadContext>();
    let thread_state = thread_context.thread_state;
    let edit_comment_action = thread_context.edit_comment_action;
    let is_pending = edit_comment_action.pending();

    let is_save_disabled = Signal::derive(
        move || is_pending.get() || thread_state.read().edit_submission().is_none()
    );

    let save = move || {
        if is_pending.get_untracked() {
            return;
        }
        let submission = thread_state.read_untracked().edit_submission();
        match submission {
            Some((edited_id, content)) if edited_id == comment_id => {
                edit_comment_action.dispatch(EditComment { comment_id, content });
            },
            _ => log::debug!("Nothing to save for comment {comment_id}."),
        }
    };

    view! {
        <form
            class="flex flex-col gap-2 w-full"
            on:submit=move |ev| {
                ev.prevent_default();
                save();
            }
        >
            <textarea
                class="textarea textarea-bordered w-full"
                rows=3
                aria-label="Edit comment"
                prop:value=move || thread_state.read().edit_draft().unwrap_or_default().to_string()
                on:input=move |ev| thread_state.update(|thread_state| thread_state.set_edit_draft(event_target_value(&ev)))
            />
            <div class="flex justify-end gap-2">
                <button
                    type="button"
                    class="button-neutral"
                    on:click=move |_| thread_state.update(|thread_state| thread_state.cancel_edit())
                >
                    "Cancel"
                </button>
                <button
                    type="submit"
                    class="button-primary"
                    disabled=is_save_disabled
                >
                    { move || match is_pending.get() {
                        true => "Saving...",
                        false => "Save",
                    }}
                </button>
            </div>
        </form>
    }
}
