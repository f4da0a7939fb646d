use chrono::{DateTime, Utc};
use leptos::html;
use leptos::prelude::*;

#[cfg(feature = "hydrate")]
use leptos_use::on_click_outside;

use crate::constants::{AVATAR_ALT_TEXT, COMMENT_TIMESTAMP_FORMAT};
use crate::icons::{CrossIcon, DotMenuIcon};
use crate::image::avatar_url_or_default;

/// Formats a timestamp as `Mar 5, 2024 • 3:07 PM`
pub fn format_comment_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format(COMMENT_TIMESTAMP_FORMAT).to_string()
}

/// Component to display the creation time of a comment
#[component]
pub fn TimestampWidget(
    #[prop(into)]
    timestamp: Signal<DateTime<Utc>>
) -> impl IntoView {
    view! {
        <span class="text-xs text-base-content/60">
            { move || format_comment_timestamp(timestamp.get()) }
        </span>
    }
}

/// Displays a round avatar, falls back to the default avatar when `avatar_url` is missing
#[component]
pub fn AvatarWidget(
    #[prop(into)]
    avatar_url: Signal<Option<String>>,
    #[prop(default = "h-8 w-8")]
    class: &'static str,
) -> impl IntoView {
    let class = format!("{class} rounded-full object-cover");
    view! {
        <img
            src=move || avatar_url_or_default(avatar_url.read().as_deref())
            alt=AVATAR_ALT_TEXT
            class=class
        />
    }
}

/// Three-dot button opening a menu with the component's children.
///
/// The open state is owned by the caller, `on_toggle` is called when the button is clicked and `on_dismiss` when
/// the user clicks outside the menu.
#[component]
pub fn DotMenu<C: IntoView + 'static>(
    #[prop(into)]
    show_menu: Signal<bool>,
    on_toggle: Callback<()>,
    on_dismiss: Callback<()>,
    children: TypedChildrenFn<C>,
) -> impl IntoView {
    let menu_ref = NodeRef::<html::Div>::new();
    #[cfg(feature = "hydrate")]
    {
        // only enable with "hydrate" to avoid server side "Dropped SendWrapper" error
        let _ = on_click_outside(menu_ref, move |_| if show_menu.get_untracked() {
            on_dismiss.run(())
        });
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = on_dismiss;
    let button_class = move || match show_menu.get() {
        true => "button-rounded-primary px-1.5 py-1",
        false => "button-rounded-neutral px-1.5 py-1",
    };
    let children = StoredValue::new(children.into_inner());

    view! {
        <div class="h-full relative" node_ref=menu_ref>
            <button
                type="button"
                class=button_class
                aria-label="Comment options"
                on:click=move |_| on_toggle.run(())
            >
                <DotMenuIcon/>
            </button>
            <Show when=move || show_menu.get()>
                <div class="absolute z-10 origin-bottom right-0 min-w-max">
                    <div class="bg-base-200 shadow-sm rounded-sm mt-1 p-1 flex flex-col gap-1">
                    {
                        children.with_value(|children| children())
                    }
                    </div>
                </div>
            </Show>
        </div>
    }.into_any()
}

/// Toast displaying `message` while `is_visible` is true, with a button to dismiss it early
#[component]
pub fn Toast(
    #[prop(into)]
    message: Signal<String>,
    #[prop(into)]
    is_visible: Signal<bool>,
    alert_class: &'static str,
    on_dismiss: Callback<()>,
) -> impl IntoView {
    let class = format!("alert flex justify-between gap-2 {alert_class}");
    view! {
        <div class=class class=("hidden", move || !is_visible.get()) role="alert">
            <span>{ move || message.get() }</span>
            <button
                type="button"
                class="p-1 rounded-full hover:bg-base-content/20"
                aria-label="Close"
                on:click=move |_| on_dismiss.run(())
            >
                <CrossIcon class="h-3 w-3"/>
            </button>
        </div>
    }
}
