use crate::ui::Route;
use dioxus::prelude::*;

const NAV_LINK: &str = "px-3 py-2 rounded-md text-sm font-medium text-indigo-900 hover:bg-indigo-50 hover:text-teal-600 transition-colors";

/// Header navigation, routed content and footer
#[component]
pub fn Layout() -> Element {
    rsx! {
        div { class: "min-h-screen flex flex-col bg-gradient-to-b from-indigo-50 to-white",
            Navbar {}
            main { class: "flex-grow", Outlet::<Route> {} }
            Footer {}
        }
    }
}

#[component]
fn Navbar() -> Element {
    rsx! {
        nav { class: "bg-white shadow-sm sticky top-0 z-40",
            div { class: "max-w-7xl mx-auto px-4 flex items-center justify-between h-16",
                Link { to: Route::Landing {}, class: "text-2xl font-bold text-indigo-900", "CalmVerse" }
                div { class: "flex space-x-2",
                    Link { to: Route::Landing {}, class: NAV_LINK, "Home" }
                    Link { to: Route::MusicRecommend {}, class: NAV_LINK, "Music" }
                    Link { to: Route::BookRecommend {}, class: NAV_LINK, "Books" }
                    Link { to: Route::MentalHealthChat {}, class: NAV_LINK, "Chat" }
                    Link { to: Route::Journal {}, class: NAV_LINK, "Journal" }
                    Link { to: Route::TherapistAppointments {}, class: NAV_LINK, "Therapists" }
                }
            }
        }
    }
}

#[component]
fn Footer() -> Element {
    rsx! {
        footer { class: "bg-indigo-900 text-indigo-100 py-8 mt-12",
            div { class: "max-w-7xl mx-auto px-4 flex flex-col md:flex-row justify-between gap-4",
                div {
                    p { class: "text-lg font-semibold text-white", "CalmVerse" }
                    p { class: "text-sm", "Music, reading, reflection and support for your mental wellbeing." }
                }
                p { class: "text-sm",
                    "If you are in crisis, call or text 988 (US) or text HOME to 741741."
                }
            }
        }
    }
}
