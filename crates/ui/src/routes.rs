use dioxus::prelude::*;
use dioxus_router::Routable;

use crate::views::DashboardView;

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[route("/", DashboardView)] Dashboard {},
}
