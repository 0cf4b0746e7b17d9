use super::status::LoadingSpinner;
use crate::api::{ChatApi, ChatResource};
use crate::flows::chat::{ChatMessage, Sender, GENERAL_RESOURCES, SUGGESTED_QUESTIONS};
use crate::flows::ChatSession;
use crate::ui::use_services;
use dioxus::prelude::*;
use std::sync::Arc;
use tracing::info;

fn run_send(mut session: Signal<ChatSession>, api: Arc<dyn ChatApi>, text: String) -> bool {
    let Some(request) = session.write().begin_send(&text) else {
        return false;
    };
    spawn(async move {
        let result = api.send(&request.payload).await;
        session.write().finish_send(&request, result);
    });
    true
}

fn run_restart(mut session: Signal<ChatSession>, api: Arc<dyn ChatApi>) {
    let Some(session_id) = session.write().reset() else {
        return;
    };
    spawn(async move {
        match api.end_session(&session_id).await {
            Ok(()) => info!("✓ Ended chat session {}", session_id),
            Err(e) => crate::api::report_failure("Ending chat session", &e),
        }
    });
}

/// Supportive chat with crisis-aware replies
#[component]
pub fn MentalHealthChat() -> Element {
    let services = use_services();
    let session = use_signal(ChatSession::default);
    let mut draft = use_signal(String::new);

    let view = session.read().clone();
    let sending = view.is_sending();

    let submit = {
        let api = services.chat.clone();
        move || {
            let text = draft();
            if run_send(session, api.clone(), text) {
                draft.set(String::new());
            }
        }
    };

    rsx! {
        div { class: "max-w-7xl mx-auto px-4 py-12",
            div { class: "text-center mb-10",
                h1 { class: "text-4xl font-bold text-indigo-900", "Mental Health Support" }
                p { class: "mt-4 text-lg text-gray-600",
                    "A safe space to talk. If you are in danger, please contact emergency services."
                }
            }

            div { class: "grid grid-cols-1 lg:grid-cols-4 gap-8",
                div { class: "lg:col-span-3 bg-white rounded-xl shadow-md flex flex-col h-[36rem]",
                    div { class: "flex justify-between items-center px-6 py-4 border-b border-gray-100",
                        h2 { class: "text-lg font-semibold text-indigo-900", "Conversation" }
                        button {
                            class: "text-sm text-indigo-600 hover:text-indigo-800",
                            onclick: {
                                let api = services.chat.clone();
                                move |_| run_restart(session, api.clone())
                            },
                            "New conversation"
                        }
                    }

                    div { class: "flex-1 overflow-y-auto p-6 space-y-4",
                        for (index, message) in view.messages().iter().cloned().enumerate() {
                            MessageBubble { key: "{index}", message }
                        }
                        if sending {
                            LoadingSpinner {}
                        }
                    }

                    div { class: "border-t border-gray-100 p-4 flex gap-2",
                        input {
                            class: "flex-1 px-4 py-3 border border-gray-300 rounded-lg focus:ring-2 focus:ring-indigo-500",
                            placeholder: "Type your message...",
                            value: "{draft}",
                            disabled: sending,
                            oninput: move |event: FormEvent| draft.set(event.value()),
                            onkeydown: {
                                let mut submit = submit.clone();
                                move |event: KeyboardEvent| {
                                    if event.key() == Key::Enter {
                                        submit();
                                    }
                                }
                            },
                        }
                        button {
                            class: "px-6 py-3 bg-teal-600 hover:bg-teal-700 text-white rounded-lg disabled:opacity-50",
                            disabled: sending || draft.read().trim().is_empty(),
                            onclick: {
                                let mut submit = submit.clone();
                                move |_| submit()
                            },
                            "Send"
                        }
                    }
                }

                div { class: "space-y-8",
                    div { class: "bg-white rounded-xl shadow-md p-6",
                        h3 { class: "text-lg font-semibold text-indigo-900 mb-4", "Suggested Questions" }
                        div { class: "space-y-2",
                            for question in SUGGESTED_QUESTIONS.iter() {
                                button {
                                    key: "{question}",
                                    class: "block w-full text-left text-sm p-2 bg-indigo-50 hover:bg-indigo-100 rounded-lg disabled:opacity-50",
                                    disabled: sending,
                                    onclick: {
                                        let api = services.chat.clone();
                                        move |_| {
                                            run_send(session, api.clone(), question.to_string());
                                        }
                                    },
                                    "{question}"
                                }
                            }
                        }
                    }

                    ResourcePanel { resources: view.resources().to_vec() }
                }
            }
        }
    }
}

#[component]
fn MessageBubble(message: ChatMessage) -> Element {
    let (row, bubble) = match message.sender {
        Sender::User => ("justify-end", "bg-indigo-600 text-white"),
        Sender::Bot if message.emergency => ("justify-start", "bg-red-50 border border-red-300 text-red-800"),
        Sender::Bot => ("justify-start", "bg-gray-100 text-gray-800"),
        Sender::System => ("justify-center", "bg-teal-50 text-teal-800 text-sm"),
    };
    let time = message.timestamp.format("%H:%M").to_string();

    rsx! {
        div { class: "flex {row}",
            div { class: "max-w-[75%] rounded-lg px-4 py-3 whitespace-pre-line {bubble}",
                p { "{message.content}" }
                p { class: "text-xs opacity-60 mt-1", "{time}" }
            }
        }
    }
}

#[component]
fn ResourcePanel(resources: Vec<ChatResource>) -> Element {
    rsx! {
        div { class: "bg-white rounded-xl shadow-md p-6",
            h3 { class: "text-lg font-semibold text-indigo-900 mb-4", "Resources" }
            if !resources.is_empty() {
                ul { class: "space-y-3 mb-6",
                    for resource in resources {
                        li { key: "{resource.name}", class: "text-sm",
                            if let Some(url) = &resource.url {
                                a {
                                    class: "font-medium text-teal-700 hover:text-teal-800",
                                    href: "{url}",
                                    target: "_blank",
                                    "{resource.name}"
                                }
                            } else {
                                p { class: "font-medium text-gray-800", "{resource.name}" }
                            }
                            if let Some(contact) = &resource.contact {
                                p { class: "text-gray-600", "{contact}" }
                            }
                        }
                    }
                }
            }
            ul { class: "space-y-3",
                for (name, description) in GENERAL_RESOURCES.iter() {
                    li { key: "{name}", class: "text-sm",
                        p { class: "font-medium text-gray-800", "{name}" }
                        p { class: "text-gray-600", "{description}" }
                    }
                }
            }
        }
    }
}
