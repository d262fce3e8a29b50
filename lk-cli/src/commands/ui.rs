//! Interactive page loop.
//!
//! Each turn loads the page for the current navigation state, draws it,
//! asks for one action, and hands the resulting event to the controller.
//! The state value is threaded through the loop; nothing else carries
//! session state.

use console::Term;
use tracing::info;

use lk_core::config::ConfigHandle;
use lk_core::error::LmResult;
use lk_services::{Controller, NavState, Notice};

use crate::prompt::{self, Choice};
use crate::render;

/// Run the interactive UI until the user quits.
pub async fn run(config: ConfigHandle) -> LmResult<()> {
    let store = super::open_store(&config).await?;
    let display = config.read().await.display.clone();
    let controller = Controller::new(store);
    let term = Term::stdout();

    info!("interactive session started");

    let mut state = NavState::default();
    let mut notices: Vec<Notice> = Vec::new();

    loop {
        let screen = controller.view(state)?;
        state = screen.state.clone();
        notices.extend(screen.notice.clone());

        term.clear_screen()?;
        term.write_line(&render::render_screen(&screen, &notices, &display))?;
        notices.clear();

        match prompt::next_choice(&screen.page, &display)? {
            Choice::Quit => break,
            Choice::Stay => notices.push(Notice::info("Nothing changed.")),
            Choice::Event(event) => {
                let dispatch = controller.dispatch(&state, event);
                state = dispatch.state;
                notices = dispatch.notices;
            }
        }
    }

    info!("interactive session ended");
    Ok(())
}
