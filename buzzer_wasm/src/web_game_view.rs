use std::cell::RefCell;
use std::rc::Rc;
use std::sync::mpsc;

use buzzer::event::NotableEvent;
use buzzer::game_view::GameViewState;
use buzzer::network::{OutgoingRequest, RequestId, RequestResult};
use buzzer::player_table::PlayerRow;
use buzzer::poll::POLL_INTERVAL;
use gloo_timers::callback::Interval;

use crate::web_document::{WebDocument, web_document};
use crate::web_element_ext::WebElementExt;
use crate::web_error_handling::{JsResult, log_error};
use crate::web_fetch::dispatch_requests;
use crate::web_storage::WebSessionStorage;
use crate::web_util::{alert, navigate};


struct WebGameView {
    state: GameViewState,
    requests_rx: mpsc::Receiver<OutgoingRequest>,
    // Dropping the interval cancels it.
    poll_timer: Option<Interval>,
    player_list_table: web_sys::Element,
    player_list_tbody: web_sys::Element,
    q_num_field: web_sys::Element,
}

type SharedGameView = Rc<RefCell<WebGameView>>;

pub fn run() -> JsResult<()> {
    let (requests_tx, requests_rx) = mpsc::channel();
    let state = GameViewState::new(&WebSessionStorage::open()?, requests_tx);
    if let NotableEvent::Navigate(path) = state.initial_event() {
        return navigate(&path);
    }

    let document = web_document()?;
    let view = Rc::new(RefCell::new(WebGameView {
        state,
        requests_rx,
        poll_timer: None,
        player_list_table: document.get_existing_element_by_id("player_list")?,
        player_list_tbody: document.get_existing_element_by_id("player_list_tbody")?,
        q_num_field: document.get_existing_element_by_id("q_num")?,
    }));

    bind_action(&document, &view, "buzz_button", |state| state.buzz())?;
    bind_action(&document, &view, "clearbuzz_button", |state| state.clear_buzz())?;
    bind_action(&document, &view, "q_num_up_button", |state| state.q_num_up())?;
    bind_action(&document, &view, "q_num_down_button", |state| state.q_num_down())?;

    let timer_view = Rc::clone(&view);
    let interval = Interval::new(POLL_INTERVAL.as_millis() as u32, move || {
        timer_view.borrow_mut().state.poll();
        send_requests(&timer_view);
    });
    view.borrow_mut().poll_timer = Some(interval);
    Ok(())
}

fn bind_action(
    document: &WebDocument, view: &SharedGameView, button_id: &str,
    action: fn(&mut GameViewState) -> Option<RequestId>,
) -> JsResult<()> {
    let view = Rc::clone(view);
    document.get_existing_element_by_id(button_id)?.add_event_listener_and_forget(
        "click",
        move |_: web_sys::Event| {
            action(&mut view.borrow_mut().state);
            send_requests(&view);
            Ok(())
        },
    )
}

fn send_requests(view: &SharedGameView) {
    let requests = view.borrow().requests_rx.try_iter().collect();
    dispatch_requests(view, requests, on_response);
}

fn on_response(view: &SharedGameView, id: RequestId, result: RequestResult) {
    let event = view.borrow_mut().state.process_response(id, result);
    let outcome = match event {
        NotableEvent::None => Ok(()),
        NotableEvent::GameUpdated => view.borrow_mut().render(),
        NotableEvent::Navigate(path) => {
            // Stop polling before leaving so nothing fires on the way out.
            drop(view.borrow_mut().poll_timer.take());
            navigate(&path)
        }
        NotableEvent::Alert(message) => alert(&message),
    };
    log_error("Game view", outcome);
}

impl WebGameView {
    // The table body is rebuilt from scratch and swapped in on every update.
    fn render(&mut self) -> JsResult<()> {
        self.q_num_field.set_text_content(Some(&self.state.q_num().to_string()));
        let new_tbody = render_player_tbody(&self.state.player_rows())?;
        self.player_list_table.replace_child(&new_tbody, &self.player_list_tbody)?;
        self.player_list_tbody = new_tbody;
        Ok(())
    }
}

pub fn render_player_tbody(rows: &[PlayerRow]) -> JsResult<web_sys::Element> {
    let tbody = web_document()?.create_element("tbody")?;
    tbody.set_id("player_list_tbody");
    for row in rows {
        let tr = tbody.append_new_element("tr")?;
        tr.append_new_element("td")?.with_text_content(&row.username);
        tr.append_new_element("td")?.with_text_content(&row.buzz_order);
    }
    Ok(tbody)
}
