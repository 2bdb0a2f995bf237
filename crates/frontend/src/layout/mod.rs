pub mod center;
pub mod global_context;
pub mod left;
pub mod right;
pub mod tabs;
pub mod top_header;

use leptos::prelude::*;
use top_header::TopHeader;

/// Main application shell.
///
/// ```text
/// +------------------------------------------+
/// |              TopHeader                    |
/// +------------------------------------------+
/// |  Sidebar  |    Content    | Notifications|
/// |   (Left)  |   (Center)    |   (Right)    |
/// +------------------------------------------+
/// ```
#[component]
pub fn Shell<L, C, R>(left: L, center: C, right: R) -> impl IntoView
where
    L: Fn() -> AnyView + 'static + Send,
    C: Fn() -> AnyView + 'static + Send,
    R: Fn() -> AnyView + 'static + Send,
{
    view! {
        <div class="app-layout">
            <TopHeader />

            <div class="app-body">
                <left::Left>
                    {left()}
                </left::Left>

                <div class="app-main">
                    {center()}
                </div>

                <right::Right>
                    {right()}
                </right::Right>
            </div>
        </div>
    }
}
