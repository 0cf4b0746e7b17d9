use dioxus::prelude::*;

/// Modal confirmation. Clicking the overlay cancels unless `busy`.
#[component]
pub fn ConfirmDialog(
    title: String,
    message: String,
    confirm_label: String,
    busy: bool,
    on_confirm: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    rsx! {
        div {
            class: "fixed inset-0 bg-black/50 flex items-center justify-center z-50",
            onclick: move |_| {
                if !busy {
                    on_cancel.call(());
                }
            },
            div {
                class: "bg-white rounded-xl shadow-lg p-6 max-w-md w-full mx-4",
                onclick: move |evt| evt.stop_propagation(),
                h2 { class: "text-xl font-bold text-indigo-900 mb-4", "{title}" }
                p { class: "text-gray-600 mb-6", "{message}" }
                div { class: "flex gap-3 justify-end",
                    button {
                        class: "px-4 py-2 bg-gray-100 hover:bg-gray-200 text-gray-800 rounded-lg",
                        disabled: busy,
                        onclick: move |_| on_cancel.call(()),
                        "Cancel"
                    }
                    button {
                        class: "px-4 py-2 bg-red-600 hover:bg-red-500 text-white rounded-lg",
                        disabled: busy,
                        onclick: move |_| on_confirm.call(()),
                        if busy { "Working..." } else { "{confirm_label}" }
                    }
                }
            }
        }
    }
}
