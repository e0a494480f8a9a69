//! Chat widget: message list, typing indicator, input form, clear control.

use chat_core::{ChatController, ChatEntry, ChatState, normalize_input};
use leptos::prelude::*;

use crate::config::WidgetConfig;
use crate::connectivity::NavigatorConnectivity;
use crate::net::GlooTransport;
use crate::view::{TYPING_CONTAINER_CLASS, WidgetView, message_class};

type WidgetController = ChatController<WidgetView, GlooTransport, NavigatorConnectivity>;

/// Self-contained chat panel.
///
/// Every submission runs as its own local task; a second message may be sent
/// while the first is still waiting, and each gets its own indicator.
#[component]
pub fn ChatWidget(config: WidgetConfig) -> impl IntoView {
    let chat = RwSignal::new(ChatState::default());
    let input = RwSignal::new(String::new());
    let messages_ref = NodeRef::<leptos::html::Div>::new();

    let view = WidgetView::new(chat, input);
    let show_clear = config.show_clear;
    let typing_label = config.copy.typing_label.clone();
    let controller = move || -> WidgetController {
        ChatController::new(view, GlooTransport::new(&config.endpoint), NavigatorConnectivity, config.copy.clone())
    };

    controller().greet();

    Effect::new(move || {
        let _ = chat.with(|c| c.entries.len());

        #[cfg(feature = "csr")]
        {
            if let Some(el) = messages_ref.get() {
                let scroll_height = el.scroll_height();
                el.set_scroll_top(scroll_height);
            }
        }
    });

    #[cfg(feature = "csr")]
    watch_browser_events(controller.clone());

    let do_send = {
        let controller = controller.clone();
        move || {
            let text = input.get_untracked();
            if normalize_input(&text).is_none() {
                return;
            }
            let controller = controller();

            #[cfg(feature = "csr")]
            leptos::task::spawn_local(async move {
                let outcome = controller.submit(&text).await;
                log_outcome(&outcome);
            });
            #[cfg(not(feature = "csr"))]
            let _ = (controller, text);
        }
    };

    let on_submit = {
        let do_send = do_send.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            do_send();
        }
    };

    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Enter" && !ev.shift_key() {
            ev.prevent_default();
            do_send();
        }
    };

    let clear_button = show_clear.then(|| {
        let on_clear = move |_| controller().clear();
        view! {
            <button class="chat-clear" type="button" on:click=on_clear>
                "Clear chat"
            </button>
        }
    });

    view! {
        <div class="chat-container">
            <div class="chat-messages" id="chat-messages" node_ref=messages_ref>
                <For
                    each=move || chat.get().entries
                    key=ChatEntry::key
                    children=move |entry| entry_view(entry, &typing_label)
                />
            </div>

            <form class="chat-form" id="chat-form" on:submit=on_submit>
                <input
                    class="chat-input"
                    id="user-input"
                    type="text"
                    autocomplete="off"
                    placeholder="Ask about the book..."
                    prop:value=move || input.get()
                    on:input=move |ev| input.set(event_target_value(&ev))
                    on:keydown=on_keydown
                />
                <button class="chat-send" type="submit">
                    "Send"
                </button>
                {clear_button}
            </form>
        </div>
    }
}

/// Markup for one list entry.
fn entry_view(entry: ChatEntry, typing_label: &str) -> AnyView {
    match entry {
        ChatEntry::Message(msg) => view! {
            <div class=message_class(msg.origin)>
                <div class="message-content">{msg.text}</div>
            </div>
        }
        .into_any(),
        ChatEntry::Typing(_) => view! {
            <div class=TYPING_CONTAINER_CLASS aria-label=typing_label.to_owned()>
                <div class="typing-indicator">
                    <div class="typing-dot"></div>
                    <div class="typing-dot"></div>
                    <div class="typing-dot"></div>
                </div>
            </div>
        }
        .into_any(),
    }
}

/// Subscribe to online/offline and visibility changes for the widget's lifetime.
#[cfg(feature = "csr")]
fn watch_browser_events(controller: impl Fn() -> WidgetController + Clone + 'static) {
    let on_online = {
        let controller = controller.clone();
        move |_| {
            log::info!("browser reports online");
            controller().connectivity_changed(true);
        }
    };
    let on_offline = {
        let controller = controller.clone();
        move |_| {
            log::info!("browser reports offline");
            controller().connectivity_changed(false);
        }
    };
    let on_visibility = move |_| {
        let visible = crate::connectivity::page_visible();
        log::debug!("page visibility changed: visible={visible}");
        controller().visibility_changed(visible);
    };

    let online = window_event_listener(leptos::ev::online, on_online);
    let offline = window_event_listener(leptos::ev::offline, on_offline);
    let visibility = window_event_listener(leptos::ev::visibilitychange, on_visibility);

    on_cleanup(move || {
        online.remove();
        offline.remove();
        visibility.remove();
    });
}

#[cfg(feature = "csr")]
fn log_outcome(outcome: &chat_core::SendOutcome) {
    use chat_core::SendOutcome;

    match outcome {
        SendOutcome::Failed(e) => log::warn!("query failed [{}]: {e}", e.kind()),
        SendOutcome::Offline => log::info!("query not sent: browser is offline"),
        SendOutcome::Replied(reply) => log::debug!("query answered ({} chars)", reply.len()),
        SendOutcome::Ignored => {}
    }
}
