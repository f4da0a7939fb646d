use leptos::prelude::*;

#[component]
pub fn CrossIcon(#[prop(default = "h-4 w-4")] class: &'static str) -> impl IntoView {
    view! {
        <img src="/svg/cross.svg" alt="" class=class/>
    }
}

#[component]
pub fn DeleteIcon(#[prop(default = "h-4 w-4")] class: &'static str) -> impl IntoView {
    view! {
        <img src="/svg/delete.svg" alt="" class=class/>
    }
}

#[component]
pub fn DotMenuIcon(#[prop(default = "h-4 w-4")] class: &'static str) -> impl IntoView {
    view! {
        <img src="/svg/dot_menu.svg" alt="" class=class/>
    }
}

#[component]
pub fn EditIcon(#[prop(default = "h-4 w-4")] class: &'static str) -> impl IntoView {
    view! {
        <img src="/svg/edit.svg" alt="" class=class/>
    }
}

/// Renders a loading icon
#[component]
pub fn LoadingIcon(#[prop(default = "h-7 w-7 my-5")] class: &'static str) -> impl IntoView {
    view! {
        <div class="w-full flex items-center justify-center">
            <img src="/svg/loading.svg" alt="Loading" class=class/>
        </div>
    }
}

#[component]
pub fn AuthErrorIcon(#[prop(default = "h-28 w-28")] class: &'static str) -> impl IntoView {
    view! {
        <img src="/svg/errors/lock.svg" alt="" class=class/>
    }
}

#[component]
pub fn InternalErrorIcon(#[prop(default = "h-28 w-28")] class: &'static str) -> impl IntoView {
    view! {
        <img src="/svg/errors/broken.svg" alt="" class=class/>
    }
}

#[component]
pub fn InvalidRequestIcon(#[prop(default = "h-28 w-28")] class: &'static str) -> impl IntoView {
    view! {
        <img src="/svg/errors/question.svg" alt="" class=class/>
    }
}

#[component]
pub fn NetworkErrorIcon(#[prop(default = "h-28 w-28")] class: &'static str) -> impl IntoView {
    view! {
        <img src="/svg/errors/offline.svg" alt="" class=class/>
    }
}

#[component]
pub fn NotAuthorizedIcon(#[prop(default = "h-28 w-28")] class: &'static str) -> impl IntoView {
    view! {
        <img src="/svg/errors/lock.svg" alt="" class=class/>
    }
}

#[component]
pub fn NotFoundIcon(#[prop(default = "h-28 w-28")] class: &'static str) -> impl IntoView {
    view! {
        <img src="/svg/errors/not_found.svg" alt="" class=class/>
    }
}

#[component]
pub fn TooHeavyIcon(#[prop(default = "h-28 w-28")] class: &'static str) -> impl IntoView {
    view! {
        <img src="/svg/errors/too_large.svg" alt="" class=class/>
    }
}
