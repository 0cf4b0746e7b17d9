use super::status::{ErrorBanner, LoadingSpinner};
use crate::api::{Book, BookCatalog};
use crate::flows::BooksPage;
use crate::ui::use_services;
use dioxus::prelude::*;
use std::sync::Arc;

fn run_search(mut page: Signal<BooksPage>, catalog: Arc<dyn BookCatalog>) {
    let Some(request) = page.write().begin_search() else {
        return;
    };
    spawn(async move {
        let result = catalog.search(&request.query).await;
        page.write().finish_search(&request, result);
    });
}

fn run_choose(mut page: Signal<BooksPage>, catalog: Arc<dyn BookCatalog>, book: Book) {
    let request = page.write().select(book.clone());
    spawn(async move {
        let result = catalog.related(&book).await;
        page.write().finish_recommendations(&request, result);
    });
}

/// Book search with related-title recommendations
#[component]
pub fn BookRecommend() -> Element {
    let services = use_services();
    let mut page = use_signal(BooksPage::new);
    let view = page.read().clone();
    let flow = view.flow();
    let searching = flow.is_searching();
    let results = flow.candidates().data().cloned().unwrap_or_default();

    rsx! {
        div { class: "max-w-7xl mx-auto px-4 py-12",
            div { class: "text-center mb-12",
                h1 { class: "text-4xl font-bold text-indigo-900", "Books That Heal" }
                p { class: "mt-4 text-lg text-gray-600",
                    "Search by title, author or topic and pick a book to see related reads."
                }
            }

            div { class: "max-w-2xl mx-auto mb-10 flex gap-2",
                input {
                    class: "flex-1 px-4 py-3 border border-gray-300 rounded-lg focus:ring-2 focus:ring-indigo-500",
                    placeholder: "Search for a book...",
                    value: "{flow.query()}",
                    oninput: move |event: FormEvent| page.write().set_query(event.value()),
                    onkeydown: {
                        let books = services.books.clone();
                        move |event: KeyboardEvent| {
                            if event.key() == Key::Enter {
                                run_search(page, books.clone());
                            }
                        }
                    },
                }
                button {
                    class: "px-6 py-3 bg-teal-600 hover:bg-teal-700 text-white rounded-lg disabled:opacity-50",
                    disabled: searching,
                    onclick: {
                        let books = services.books.clone();
                        move |_| run_search(page, books.clone())
                    },
                    if searching { "Searching..." } else { "Search" }
                }
            }

            if let Some(message) = view.error() {
                ErrorBanner {
                    message: message.to_string(),
                    on_dismiss: move |_| page.write().dismiss_errors(),
                }
            }

            if searching {
                LoadingSpinner { label: "Searching books..." }
            } else if flow.is_list_open() {
                div { class: "mb-12",
                    h2 { class: "text-2xl font-semibold text-indigo-900 mb-6", "Search results" }
                    if results.is_empty() {
                        p { class: "text-gray-500", "No books found. Try another search." }
                    }
                    div { class: "grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-4 gap-6",
                        for book in results {
                            BookCard {
                                key: "{book.id}",
                                book: book.clone(),
                                on_select: {
                                    let books = services.books.clone();
                                    move |book: Book| run_choose(page, books.clone(), book)
                                },
                            }
                        }
                    }
                }
            }

            if let Some(selected) = view.selected() {
                div { class: "bg-white rounded-xl shadow-md p-6 mb-8",
                    h2 { class: "text-2xl font-semibold text-indigo-900", "{selected.title}" }
                    p { class: "text-gray-600", "{selected.author_line()}" }
                    if let Some(description) = &selected.description {
                        p { class: "mt-4 text-gray-700", "{description}" }
                    }
                }

                if flow.detail().is_loading() {
                    LoadingSpinner { label: "Finding related books..." }
                } else if view.has_no_recommendations() {
                    p { class: "text-gray-500", "No related books found." }
                } else {
                    h3 { class: "text-xl font-semibold text-indigo-900 mb-4", "You might also like" }
                    div { class: "grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-4 gap-6",
                        for book in view.recommendations().to_vec() {
                            BookCard {
                                key: "rec-{book.id}",
                                book: book.clone(),
                                on_select: {
                                    let books = services.books.clone();
                                    move |book: Book| run_choose(page, books.clone(), book)
                                },
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn BookCard(book: Book, on_select: EventHandler<Book>) -> Element {
    let picked = book.clone();
    rsx! {
        button {
            class: "text-left bg-white rounded-xl shadow-md overflow-hidden hover:shadow-lg transition-shadow",
            onclick: move |_| on_select.call(picked.clone()),
            if let Some(thumbnail) = &book.thumbnail {
                img { class: "w-full h-56 object-cover", src: "{thumbnail}", alt: "{book.title}" }
            } else {
                div { class: "w-full h-56 bg-indigo-100 flex items-center justify-center text-indigo-400",
                    "No cover"
                }
            }
            div { class: "p-4",
                h3 { class: "font-semibold text-indigo-900", "{book.title}" }
                p { class: "text-sm text-gray-600", "{book.author_line()}" }
                if let Some(date) = &book.published_date {
                    p { class: "text-xs text-gray-400 mt-1", "{date}" }
                }
            }
        }
    }
}
