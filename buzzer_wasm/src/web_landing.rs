use std::cell::RefCell;
use std::rc::Rc;
use std::sync::mpsc;

use buzzer::event::NotableEvent;
use buzzer::landing::LandingState;
use buzzer::network::{OutgoingRequest, RequestId, RequestResult};

use crate::web_document::web_document;
use crate::web_element_ext::WebElementExt;
use crate::web_error_handling::{JsResult, log_error};
use crate::web_fetch::dispatch_requests;
use crate::web_storage::WebSessionStorage;
use crate::web_util::{alert, navigate};


struct WebLanding {
    state: LandingState<WebSessionStorage>,
    requests_rx: mpsc::Receiver<OutgoingRequest>,
}

type SharedLanding = Rc<RefCell<WebLanding>>;

pub fn run() -> JsResult<()> {
    let document = web_document()?;
    let username_input = document.get_existing_input_by_id("username")?;
    let game_ext_id_input = document.get_existing_input_by_id("game_ext_id")?;
    let username_create_input = document.get_existing_input_by_id("username_create")?;

    let (requests_tx, requests_rx) = mpsc::channel();
    let landing = Rc::new(RefCell::new(WebLanding {
        state: LandingState::new(WebSessionStorage::open()?, requests_tx),
        requests_rx,
    }));

    {
        let landing = Rc::clone(&landing);
        document.get_existing_element_by_id("join_button")?.add_event_listener_and_forget(
            "click",
            move |_: web_sys::Event| {
                landing
                    .borrow_mut()
                    .state
                    .join(&username_input.value(), &game_ext_id_input.value());
                send_requests(&landing);
                Ok(())
            },
        )?;
    }
    {
        let landing = Rc::clone(&landing);
        document.get_existing_element_by_id("create_button")?.add_event_listener_and_forget(
            "click",
            move |_: web_sys::Event| {
                landing.borrow_mut().state.create(&username_create_input.value());
                send_requests(&landing);
                Ok(())
            },
        )?;
    }
    Ok(())
}

fn send_requests(landing: &SharedLanding) {
    let requests = landing.borrow().requests_rx.try_iter().collect();
    dispatch_requests(landing, requests, on_response);
}

fn on_response(landing: &SharedLanding, id: RequestId, result: RequestResult) {
    let event = landing.borrow_mut().state.process_response(id, result);
    let outcome = match event {
        NotableEvent::Navigate(path) => navigate(&path),
        NotableEvent::Alert(message) => alert(&message),
        NotableEvent::None | NotableEvent::GameUpdated => Ok(()),
    };
    log_error("Landing page", outcome);
}
