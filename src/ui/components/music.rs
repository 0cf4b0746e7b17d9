use super::status::{ErrorBanner, LoadingSpinner};
use crate::api::{MusicApi, Song};
use crate::flows::music::fetch_matches;
use crate::flows::MusicPage;
use crate::ui::use_services;
use dioxus::prelude::*;
use std::sync::Arc;

fn run_search(mut page: Signal<MusicPage>, music: Arc<dyn MusicApi>) {
    let Some(request) = page.write().begin_search() else {
        return;
    };
    spawn(async move {
        let result = fetch_matches(music.as_ref(), &request.query).await;
        page.write().finish_search(&request, result);
    });
}

fn run_choose(mut page: Signal<MusicPage>, music: Arc<dyn MusicApi>, title: String) {
    let request = page.write().select(title);
    spawn(async move {
        let result = music.recommend(&request.key).await;
        page.write().finish_recommendations(&request, result);
    });
}

/// Song search with similarity recommendations
#[component]
pub fn MusicRecommend() -> Element {
    let services = use_services();
    let mut page = use_signal(MusicPage::new);
    let view = page.read().clone();
    let flow = view.flow();

    let matches = flow.candidates().data().cloned().unwrap_or_default();
    let searching = flow.is_searching();

    rsx! {
        div { class: "max-w-7xl mx-auto px-4 py-12",
            div { class: "text-center mb-12",
                h1 { class: "text-4xl font-bold text-indigo-900", "Music for Your Mood" }
                p { class: "mt-4 text-lg text-gray-600",
                    "Search for a song you love and discover similar tracks."
                }
            }

            div { class: "max-w-2xl mx-auto mb-10 relative",
                div { class: "flex gap-2",
                    input {
                        class: "flex-1 px-4 py-3 border border-gray-300 rounded-lg focus:ring-2 focus:ring-indigo-500",
                        placeholder: "Search for a song...",
                        value: "{flow.query()}",
                        oninput: move |event: FormEvent| page.write().set_query(event.value()),
                        onkeydown: {
                            let music = services.music.clone();
                            move |event: KeyboardEvent| {
                                if event.key() == Key::Enter {
                                    run_search(page, music.clone());
                                }
                            }
                        },
                    }
                    button {
                        class: "px-6 py-3 bg-teal-600 hover:bg-teal-700 text-white rounded-lg disabled:opacity-50",
                        disabled: searching,
                        onclick: {
                            let music = services.music.clone();
                            move |_| run_search(page, music.clone())
                        },
                        if searching { "Searching..." } else { "Search" }
                    }
                }

                if flow.is_list_open() {
                    SongDropdown {
                        matches,
                        on_select: {
                            let music = services.music.clone();
                            move |title: String| run_choose(page, music.clone(), title)
                        },
                    }
                }
            }

            if let Some(message) = view.error() {
                ErrorBanner {
                    message: message.to_string(),
                    on_dismiss: move |_| page.write().dismiss_errors(),
                }
            }

            if flow.detail().is_loading() {
                LoadingSpinner { label: "Finding similar songs..." }
            } else if let Some(song) = view.selected_song() {
                RecommendationGrid {
                    input_song: song.to_string(),
                    songs: view.recommendations().to_vec(),
                }
            }
        }
    }
}

#[component]
fn SongDropdown(matches: Vec<String>, on_select: EventHandler<String>) -> Element {
    rsx! {
        div { class: "absolute z-10 w-full mt-2 bg-white border border-gray-200 rounded-lg shadow-lg max-h-72 overflow-y-auto",
            for title in matches {
                button {
                    key: "{title}",
                    class: "block w-full text-left px-4 py-3 hover:bg-indigo-50",
                    onclick: {
                        let title = title.clone();
                        move |_| on_select.call(title.clone())
                    },
                    "{title}"
                }
            }
        }
    }
}

#[component]
fn RecommendationGrid(input_song: String, songs: Vec<Song>) -> Element {
    rsx! {
        div {
            h2 { class: "text-2xl font-semibold text-indigo-900 mb-6",
                "Because you like \"{input_song}\""
            }
            if songs.is_empty() {
                p { class: "text-gray-500", "No recommendations yet." }
            }
            div { class: "grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-3 gap-6",
                for song in songs {
                    SongCard { key: "{song.name}-{song.artist}", song }
                }
            }
        }
    }
}

#[component]
fn SongCard(song: Song) -> Element {
    let spotify = song.spotify_url();
    rsx! {
        div { class: "bg-white rounded-xl shadow-md overflow-hidden",
            img {
                class: "w-full h-48 object-cover",
                src: "{song.album_cover_url}",
                alt: "{song.name}",
            }
            div { class: "p-4",
                h3 { class: "text-lg font-semibold text-indigo-900", "{song.name}" }
                p { class: "text-gray-600", "{song.artist}" }
                if let Some(url) = spotify {
                    a {
                        class: "inline-block mt-3 text-teal-600 hover:text-teal-700",
                        href: "{url}",
                        target: "_blank",
                        "Listen on Spotify"
                    }
                }
            }
        }
    }
}
