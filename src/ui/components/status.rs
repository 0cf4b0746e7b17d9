use dioxus::prelude::*;

/// Red banner for a failed action, optionally dismissible
#[component]
pub fn ErrorBanner(message: String, on_dismiss: Option<EventHandler<()>>) -> Element {
    rsx! {
        div {
            class: "bg-red-50 border-l-4 border-red-500 text-red-700 p-4 mb-6 flex items-start justify-between gap-4",
            role: "alert",
            p { "{message}" }
            if let Some(on_dismiss) = on_dismiss {
                button {
                    class: "text-red-700 hover:text-red-900",
                    onclick: move |_| on_dismiss.call(()),
                    "✕"
                }
            }
        }
    }
}

#[component]
pub fn SuccessBanner(message: String, on_dismiss: EventHandler<()>) -> Element {
    rsx! {
        div {
            class: "bg-green-50 border-l-4 border-green-500 text-green-700 p-4 mb-6 flex items-start justify-between gap-4",
            p { "{message}" }
            button {
                class: "text-green-700 hover:text-green-900",
                onclick: move |_| on_dismiss.call(()),
                "✕"
            }
        }
    }
}

#[component]
pub fn LoadingSpinner(label: Option<String>) -> Element {
    rsx! {
        div {
            class: "flex justify-center items-center py-12",
            div {
                class: "animate-spin rounded-full h-12 w-12 border-t-2 border-b-2 border-indigo-600"
            }
            if let Some(label) = label {
                p { class: "ml-4 text-gray-600", "{label}" }
            }
        }
    }
}
