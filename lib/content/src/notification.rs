use leptos::prelude::*;

use postline_core::notification::{NotificationKind, Notifications};
use postline_utils::widget::Toast;

/// Error and success toasts of a comment thread
#[component]
pub fn NotificationToasts(
    notifications: RwSignal<Notifications>,
) -> impl IntoView {
    view! {
        <div class="toast toast-center z-50">
            <NotificationToast notifications kind=NotificationKind::Error/>
            <NotificationToast notifications kind=NotificationKind::Success/>
        </div>
    }
}

#[component]
fn NotificationToast(
    notifications: RwSignal<Notifications>,
    kind: NotificationKind,
) -> impl IntoView {
    let message = Signal::derive(move || notifications.read().channel(kind).message.clone());
    let is_visible = Signal::derive(move || notifications.read().channel(kind).is_visible);
    let on_dismiss = Callback::new(move |_: ()| notifications.update(|notifications| notifications.channel_mut(kind).dismiss()));

    view! {
        <Toast message is_visible alert_class=kind.alert_class() on_dismiss/>
    }
}
