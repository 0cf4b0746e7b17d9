use crate::ui::Route;
use dioxus::prelude::*;

#[component]
pub fn Landing() -> Element {
    rsx! {
        div { class: "max-w-7xl mx-auto px-4 py-16",
            div { class: "text-center py-12",
                h1 { class: "text-5xl font-bold text-indigo-900 mb-4", "Find your calm" }
                p { class: "text-xl text-gray-600 mb-8 max-w-2xl mx-auto",
                    "Music, books, reflective journaling and professional support, all in one place."
                }
                div { class: "flex justify-center space-x-4",
                    Link {
                        to: Route::MusicRecommend {},
                        class: "bg-teal-600 text-white px-6 py-3 rounded-lg hover:bg-teal-700 transition-colors",
                        "Discover Music"
                    }
                    Link {
                        to: Route::MentalHealthChat {},
                        class: "bg-indigo-600 text-white px-6 py-3 rounded-lg hover:bg-indigo-700 transition-colors",
                        "Talk to Someone"
                    }
                }
            }

            div { class: "grid grid-cols-1 md:grid-cols-3 gap-8 mt-12",
                FeatureCard {
                    to: Route::BookRecommend {},
                    title: "Read & Reflect",
                    blurb: "Find books related to the ones that helped you before.",
                }
                FeatureCard {
                    to: Route::Journal {},
                    title: "Mindful Journal",
                    blurb: "Write, track your moods and follow guided prompts.",
                }
                FeatureCard {
                    to: Route::TherapistAppointments {},
                    title: "Professional Support",
                    blurb: "Browse therapists and book an open time slot.",
                }
            }
        }
    }
}

#[component]
fn FeatureCard(to: Route, title: String, blurb: String) -> Element {
    rsx! {
        Link { to, class: "block text-center p-6 bg-white rounded-xl shadow-md hover:shadow-lg transition-shadow",
            h3 { class: "text-xl font-bold text-indigo-900 mb-3", "{title}" }
            p { class: "text-gray-600", "{blurb}" }
        }
    }
}

#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let path = segments.join("/");
    rsx! {
        div { class: "max-w-xl mx-auto px-4 py-24 text-center",
            h1 { class: "text-4xl font-bold text-indigo-900 mb-4", "Page not found" }
            p { class: "text-gray-600 mb-8", "Nothing lives at /{path}." }
            Link {
                to: Route::Landing {},
                class: "text-teal-600 hover:text-teal-700",
                "← Back home"
            }
        }
    }
}
