#[cfg(feature = "desktop")]
use dioxus::desktop::{Config as DioxusConfig, WindowBuilder};
use dioxus::prelude::*;

use crate::api::Services;
use crate::ui::components::*;

pub const MAIN_CSS: Asset = asset!("/assets/main.css");
pub const TAILWIND_CSS: Asset = asset!("/assets/tailwind.css");

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
    #[route("/")]
    Landing {},
    #[route("/musicrecommend")]
    MusicRecommend {},
    #[route("/books")]
    BookRecommend {},
    #[route("/chat")]
    MentalHealthChat {},
    #[route("/journal")]
    Journal {},
    #[route("/therapists")]
    TherapistAppointments {},
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

/// API gateways provided at launch
pub fn use_services() -> Services {
    use_context::<Services>()
}

#[cfg(feature = "desktop")]
pub fn make_config() -> DioxusConfig {
    DioxusConfig::default().with_window(make_window())
}

#[cfg(feature = "desktop")]
fn make_window() -> WindowBuilder {
    WindowBuilder::new()
        .with_title("CalmVerse")
        .with_always_on_top(false)
        .with_inner_size(dioxus::desktop::LogicalSize::new(1200, 860))
}
