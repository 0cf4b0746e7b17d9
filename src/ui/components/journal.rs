use super::dialog::ConfirmDialog;
use super::status::{ErrorBanner, LoadingSpinner};
use crate::api::{InsightCount, JournalApi, JournalEntry, JournalInsights, JournalPrompt};
use crate::flows::journal::{fetch_snapshot, RefreshRequest, SubmitTarget, PREVIEW_CHARS};
use crate::flows::JournalPage;
use crate::ui::use_services;
use dioxus::prelude::*;
use std::sync::Arc;

fn run_refresh(mut page: Signal<JournalPage>, api: Arc<dyn JournalApi>) {
    let Some(request) = page.write().begin_refresh() else {
        return;
    };
    run_load(page, api, request);
}

fn run_reload(mut page: Signal<JournalPage>, api: Arc<dyn JournalApi>) {
    let request = page.write().begin_reload();
    run_load(page, api, request);
}

fn run_load(mut page: Signal<JournalPage>, api: Arc<dyn JournalApi>, request: RefreshRequest) {
    spawn(async move {
        let result = fetch_snapshot(api.as_ref()).await;
        page.write().finish_refresh(&request, result);
    });
}

fn run_submit(mut page: Signal<JournalPage>, mut form_error: Signal<Option<String>>, api: Arc<dyn JournalApi>) {
    let request = match page.write().begin_submit() {
        Ok(request) => request,
        Err(e) => {
            form_error.set(Some(e.to_string()));
            return;
        }
    };
    form_error.set(None);
    spawn(async move {
        let result = match &request.target {
            SubmitTarget::Create => api.create_entry(&request.draft).await,
            SubmitTarget::Update(id) => api.update_entry(id, &request.draft).await,
        };
        if page.write().finish_submit(result) {
            run_reload(page, api);
        }
    });
}

fn run_delete(mut page: Signal<JournalPage>, api: Arc<dyn JournalApi>) {
    let Some(request) = page.write().confirm_delete() else {
        return;
    };
    spawn(async move {
        let result = api.delete_entry(&request.id).await;
        if page.write().finish_delete(&request, result) {
            run_reload(page, api);
        }
    });
}

/// Journal entries, writing prompts and mood insights
#[component]
pub fn Journal() -> Element {
    let services = use_services();
    let mut page = use_signal(JournalPage::new);
    let form_error = use_signal(|| None::<String>);

    use_effect({
        let api = services.journal.clone();
        move || run_refresh(page, api.clone())
    });

    let view = page.read().clone();
    let refreshing = view.snapshot().is_loading();
    let loading = refreshing && view.snapshot().data().is_none();
    let form_open = view.is_form_open();

    rsx! {
        div { class: "max-w-7xl mx-auto px-4 py-12",
            div { class: "text-center mb-12",
                h1 { class: "text-4xl font-bold text-indigo-900", "Mindful Journal" }
                p { class: "mt-4 text-lg text-gray-600",
                    "Express your thoughts, track your moods, and find clarity through reflective writing."
                }
            }

            if let Some(message) = view.error() {
                ErrorBanner {
                    message: message.to_string(),
                    on_dismiss: move |_| page.write().dismiss_error(),
                }
            }

            div { class: "mb-8 flex justify-end gap-3",
                button {
                    class: "px-6 py-3 bg-white border border-indigo-200 text-indigo-700 hover:bg-indigo-50 rounded-lg disabled:opacity-50",
                    disabled: refreshing,
                    onclick: {
                        let api = services.journal.clone();
                        move |_| run_refresh(page, api.clone())
                    },
                    if refreshing { "Refreshing..." } else { "Refresh" }
                }
                button {
                    class: "px-6 py-3 bg-teal-600 hover:bg-teal-700 text-white rounded-lg",
                    onclick: move |_| page.write().toggle_form(),
                    if form_open { "Cancel" } else { "New Entry" }
                }
            }

            if form_open {
                EntryForm { page, form_error }
            }

            if loading {
                LoadingSpinner { label: "Loading your journal..." }
            } else {
                div { class: "grid grid-cols-1 lg:grid-cols-3 gap-8",
                    div { class: "lg:col-span-2 space-y-6",
                        h2 { class: "text-2xl font-semibold text-indigo-900", "Your Entries" }
                        if view.entries().is_empty() {
                            p { class: "text-gray-500",
                                "No journal entries yet. Start writing to capture your thoughts."
                            }
                        }
                        for entry in view.entries().to_vec() {
                            EntryCard {
                                key: "{entry.id}",
                                entry: entry.clone(),
                                on_edit: move |entry: JournalEntry| page.write().edit(&entry),
                                on_delete: move |id: String| page.write().request_delete(id),
                            }
                        }
                    }

                    div { class: "space-y-8",
                        PromptList {
                            prompts: view.prompts().iter().take(5).cloned().collect::<Vec<_>>(),
                            on_pick: move |prompt: String| page.write().apply_prompt(&prompt),
                        }
                        if let Some(insights) = view.insights() {
                            InsightsPanel { insights: insights.clone() }
                        }
                    }
                }
            }

            if view.pending_delete().is_some() {
                ConfirmDialog {
                    title: "Delete entry?",
                    message: "This journal entry will be permanently removed.",
                    confirm_label: "Delete",
                    busy: view.is_deleting(),
                    on_confirm: {
                        let api = services.journal.clone();
                        move |_| run_delete(page, api.clone())
                    },
                    on_cancel: move |_| page.write().cancel_delete(),
                }
            }
        }
    }
}

#[component]
fn EntryForm(page: Signal<JournalPage>, form_error: Signal<Option<String>>) -> Element {
    let api = use_services().journal;
    let view = page.read().clone();
    let form = view.form();
    let saving = view.is_saving();
    let heading = if form.editing.is_some() {
        "Edit Entry"
    } else {
        "New Entry"
    };

    rsx! {
        form {
            class: "bg-white rounded-xl shadow-md p-6 mb-10 space-y-4",
            onsubmit: {
                let api = api.clone();
                move |event: FormEvent| {
                    event.prevent_default();
                    run_submit(page, form_error, api.clone());
                }
            },
            h2 { class: "text-2xl font-semibold text-indigo-900", "{heading}" }
            if let Some(message) = form_error() {
                p { class: "text-red-600 text-sm", "{message}" }
            }
            div {
                label { class: "block text-gray-700 font-medium mb-2", r#for: "title", "Title" }
                input {
                    id: "title",
                    class: "w-full px-4 py-2 border border-gray-300 rounded-lg",
                    placeholder: "Give your entry a title",
                    value: "{form.title}",
                    oninput: move |event: FormEvent| page.write().form_mut().title = event.value(),
                }
            }
            div {
                label { class: "block text-gray-700 font-medium mb-2", r#for: "content", "Content" }
                textarea {
                    id: "content",
                    class: "w-full px-4 py-2 border border-gray-300 rounded-lg h-48",
                    placeholder: "Write your thoughts here...",
                    value: "{form.content}",
                    oninput: move |event: FormEvent| page.write().form_mut().content = event.value(),
                }
            }
            div {
                label { class: "block text-gray-700 font-medium mb-2", r#for: "mood", "Current Mood" }
                input {
                    id: "mood",
                    class: "w-full px-4 py-2 border border-gray-300 rounded-lg",
                    placeholder: "How are you feeling? (e.g., calm, anxious, hopeful)",
                    value: "{form.mood}",
                    oninput: move |event: FormEvent| page.write().form_mut().mood = event.value(),
                }
            }
            div {
                label { class: "block text-gray-700 font-medium mb-2", r#for: "tags", "Tags" }
                input {
                    id: "tags",
                    class: "w-full px-4 py-2 border border-gray-300 rounded-lg",
                    placeholder: "Add tags separated by commas (e.g., meditation, anxiety, growth)",
                    value: "{form.tags}",
                    oninput: move |event: FormEvent| page.write().form_mut().tags = event.value(),
                }
            }
            button {
                r#type: "submit",
                class: "px-6 py-3 bg-indigo-600 hover:bg-indigo-700 text-white rounded-lg disabled:opacity-50",
                disabled: saving,
                if saving { "Saving..." } else { "Save Entry" }
            }
        }
    }
}

#[component]
fn EntryCard(entry: JournalEntry, on_edit: EventHandler<JournalEntry>, on_delete: EventHandler<String>) -> Element {
    let preview = entry.preview(PREVIEW_CHARS);
    let written = entry
        .created_at
        .map(|at| at.format("%B %-d, %Y").to_string())
        .unwrap_or_default();
    let editable = entry.clone();
    let id = entry.id.clone();

    rsx! {
        div { class: "bg-white rounded-xl shadow-md p-6",
            div { class: "flex justify-between items-start",
                div {
                    h3 { class: "text-xl font-semibold text-indigo-900", "{entry.title}" }
                    if !written.is_empty() {
                        p { class: "text-sm text-gray-400", "{written}" }
                    }
                }
                div { class: "flex gap-3",
                    button {
                        class: "text-indigo-600 hover:text-indigo-800 text-sm",
                        onclick: move |_| on_edit.call(editable.clone()),
                        "Edit"
                    }
                    button {
                        class: "text-red-600 hover:text-red-800 text-sm",
                        onclick: move |_| on_delete.call(id.clone()),
                        "Delete"
                    }
                }
            }
            p { class: "mt-4 text-gray-700 whitespace-pre-line", "{preview}" }
            if let Some(mood) = &entry.mood {
                p { class: "mt-4 text-sm",
                    span { class: "text-gray-700 font-medium", "Mood: " }
                    span { class: "text-teal-700", "{mood}" }
                }
            }
            if !entry.tags.is_empty() {
                div { class: "mt-3 flex flex-wrap gap-2",
                    for tag in entry.tags.iter() {
                        span {
                            key: "{tag}",
                            class: "px-2 py-1 bg-indigo-50 text-indigo-700 rounded-full text-xs",
                            "#{tag}"
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn PromptList(prompts: Vec<JournalPrompt>, on_pick: EventHandler<String>) -> Element {
    rsx! {
        div { class: "bg-white rounded-xl shadow-md p-6",
            h2 { class: "text-xl font-semibold text-indigo-900 mb-4", "Journal Prompts" }
            p { class: "text-gray-600 mb-4", "Need inspiration? Try one of these prompts:" }
            div { class: "space-y-3",
                for prompt in prompts {
                    button {
                        key: "{prompt.prompt}",
                        class: "block w-full text-left p-3 bg-indigo-50 hover:bg-indigo-100 rounded-lg",
                        onclick: {
                            let text = prompt.prompt.clone();
                            move |_| on_pick.call(text.clone())
                        },
                        p { class: "text-gray-700", "{prompt.prompt}" }
                        span { class: "text-xs text-indigo-500", "{prompt.category}" }
                    }
                }
            }
        }
    }
}

#[component]
fn InsightsPanel(insights: JournalInsights) -> Element {
    rsx! {
        div { class: "bg-white rounded-xl shadow-md p-6",
            h2 { class: "text-xl font-semibold text-indigo-900 mb-4", "Your Insights" }
            p { class: "text-gray-600 mb-4", "{insights.message}" }
            p { class: "text-gray-700 mb-4", "Total entries: {insights.total_entries}" }
            CountList { title: "Top Moods", counts: insights.top_moods.clone() }
            CountList { title: "Top Tags", counts: insights.top_tags.clone() }
        }
    }
}

#[component]
fn CountList(title: String, counts: Vec<InsightCount>) -> Element {
    if counts.is_empty() {
        return rsx! {};
    }
    rsx! {
        div { class: "mb-4",
            p { class: "font-medium text-gray-700 mb-2", "{title}" }
            ul { class: "space-y-1",
                for count in counts {
                    li { class: "flex justify-between text-sm text-gray-600",
                        span { {count.label_text()} }
                        span { "{count.count}" }
                    }
                }
            }
        }
    }
}
