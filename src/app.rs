use crate::api::Api;
use crate::config::Config;
use crate::error::AppError;
use crate::events::network::{Event as NetworkEvent, Handler as NetworkEventHandler};
use crate::events::terminal::Handler as TerminalEventHandler;
use crate::logger::LogBuffer;
use crate::state::State;
use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::*;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout};
use std::sync::Arc;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::sync::Mutex;

pub type NetworkEventSender = UnboundedSender<NetworkEvent>;
type NetworkEventReceiver = UnboundedReceiver<NetworkEvent>;

/// Oversees event processing, state management, and terminal output.
///
pub struct App {
    api: Api,
    state: Arc<Mutex<State>>,
}

impl App {
    /// Start a new application according to the given configuration. Returns
    /// the result of the application execution.
    ///
    pub async fn start(config: Config, log: LogBuffer) -> Result<()> {
        info!("Starting application against {}...", config.base_url);
        let (tx, rx) = unbounded_channel::<NetworkEvent>();
        let api = Api::new(&config.base_url, config.request_timeout())?;
        let state = State::new(tx.clone(), log, config.success_ttl(), config.theme()?);
        let app = App {
            api,
            state: Arc::new(Mutex::new(state)),
        };
        app.start_network(rx);
        app.start_ui(tx).await?;

        info!("Exiting application...");
        Ok(())
    }

    /// Start a separate thread for asynchronous state mutations. Every event
    /// runs as its own task so a slow request never blocks a newer one.
    ///
    fn start_network(&self, mut net_receiver: NetworkEventReceiver) {
        debug!("Creating new thread for asynchronous networking...");
        let handler = NetworkEventHandler::new(Arc::clone(&self.state), self.api.clone());
        std::thread::spawn(move || {
            let runtime = match tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime,
                Err(e) => {
                    error!("Failed to create network runtime: {}", e);
                    return;
                }
            };
            runtime.block_on(async {
                while let Some(network_event) = net_receiver.recv().await {
                    let handler = handler.clone();
                    tokio::spawn(async move { handler.handle(network_event).await });
                }
            })
        });
    }

    /// Begin the terminal event poll on a separate thread before starting the
    /// render loop on the main thread. Return the result following an exit
    /// request or unrecoverable error.
    ///
    async fn start_ui(&self, net_sender: NetworkEventSender) -> Result<()> {
        debug!("Starting user interface on main thread...");
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen)?;
        enable_raw_mode()?;

        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.hide_cursor()?;

        net_sender
            .send(NetworkEvent::Bootstrap)
            .map_err(|e| AppError::Terminal(format!("network thread unavailable: {}", e)))?;

        let result = self.run_loop(&mut terminal).await;

        disable_raw_mode()?;
        execute!(io::stdout(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    async fn run_loop(&self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        let terminal_event_handler = TerminalEventHandler::new();
        loop {
            {
                let state = self.state.lock().await;
                terminal.draw(|frame| crate::ui::render(frame, &state))?;
            }
            // Lock is released while waiting so network tasks can write.
            let event = terminal_event_handler.next_event()?;
            let mut state = self.state.lock().await;
            if !terminal_event_handler.apply(event, &mut state) {
                debug!("Received application exit request.");
                return Ok(());
            }
        }
    }
}
