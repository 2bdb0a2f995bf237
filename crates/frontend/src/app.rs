use crate::domain::a007_notification::ui::panel::NotificationsPanel;
use crate::layout::center::Tabs;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::left::Sidebar;
use crate::layout::Shell;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Provide the AppGlobalContext store to the whole app via context.
    let ctx = AppGlobalContext::new();
    provide_context(ctx);

    // Активная вкладка восстанавливается из адресной строки
    ctx.init_router_integration();

    view! {
        <Shell
            left=|| view! { <Sidebar /> }.into_any()
            center=|| view! { <Tabs /> }.into_any()
            right=|| view! { <NotificationsPanel /> }.into_any()
        />
    }
}
