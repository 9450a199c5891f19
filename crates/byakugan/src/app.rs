use crate::{AppCommand, AppResult, HELP, config::Config, render_live_feed};

use std::{io::BufRead, sync::Arc};

use byakugan_core::{FeedEndpoints, SessionController, SessionHandle};
use tokio::sync::mpsc;
use tracing::{error, info, instrument, warn};

/// Main application state.
///
/// Owns the mounted recording session and the feed targets derived from
/// the configuration. User input arrives on `command_rx` from a dedicated
/// stdin thread.
pub struct App {
    pub(crate) config: Config,
    pub(crate) session: SessionHandle,
    pub(crate) endpoints: FeedEndpoints,
    pub(crate) command_rx: mpsc::Receiver<AppCommand>,
}

impl App {
    /// Mount a session against the configured appliance.
    #[instrument(skip_all)]
    pub(crate) async fn mount(
        config: Config,
        command_rx: mpsc::Receiver<AppCommand>,
    ) -> AppResult<Self> {
        let (session, endpoints) = mount_session(&config).await?;

        Ok(Self {
            config,
            session,
            endpoints,
            command_rx,
        })
    }

    /// Run the main application event loop.
    #[instrument(skip(self))]
    pub(crate) async fn run(mut self) -> AppResult<()> {
        info!(server_address = %self.config.server.address, "Byakugan starting");

        println!("{}", HELP);
        self.show();

        let mut snapshots = self.session.subscribe();

        loop {
            tokio::select! {
                cmd = self.command_rx.recv() => {
                    let Some(cmd) = cmd else {
                        info!("Input closed, shutting down");
                        break;
                    };

                    match cmd {
                        AppCommand::Toggle => {
                            if let Err(e) = self.session.toggle().await {
                                error!(session_id = %self.session.session_id(), error = ?e, "Failed to toggle recording");
                            }
                        }
                        AppCommand::Status => self.show(),
                        AppCommand::Help => println!("{}", HELP),
                        AppCommand::SetServer { address } => {
                            match self.switch_server(&address).await {
                                Ok(()) => {
                                    snapshots = self.session.subscribe();
                                    self.show();
                                }
                                Err(e) => {
                                    warn!(address = %address, error = ?e, "Server address not changed");
                                    println!("Could not use {:?}: {}", address, e);
                                }
                            }
                        }
                        AppCommand::Shutdown => {
                            info!("Shutdown requested");
                            break;
                        }
                    }
                }

                changed = snapshots.changed() => {
                    if changed.is_err() {
                        error!(session_id = %self.session.session_id(), "Session ended unexpectedly");
                        break;
                    }
                    self.show();
                }
            }
        }

        if let Err(e) = self.session.shutdown().await {
            warn!(error = ?e, "Session was already closed");
        }
        info!("Byakugan shut down successfully");

        Ok(())
    }

    /// Persist a new server address and remount the session against it.
    ///
    /// The old session is torn down first, so at most one session exists.
    #[instrument(skip(self))]
    async fn switch_server(&mut self, address: &str) -> AppResult<()> {
        let mut config = self.config.clone();
        config.update_server_address(address)?;
        config.save()?;

        if let Err(e) = self.session.clone().shutdown().await {
            warn!(error = ?e, "Previous session was already closed");
        }

        let (session, endpoints) = mount_session(&config).await?;
        self.session = session;
        self.endpoints = endpoints;
        self.config = config;

        Ok(())
    }

    fn show(&self) {
        println!(
            "\n{}",
            render_live_feed(&self.session.snapshot(), &self.endpoints)
        );
    }
}

async fn mount_session(config: &Config) -> AppResult<(SessionHandle, FeedEndpoints)> {
    let api = config.record_api()?;
    let endpoints = config.feed_endpoints(&api);
    let session = SessionController::mount(Arc::new(api), config.session_settings()).await;

    info!(
        session_id = %session.session_id(),
        base_url = %endpoints.live_url,
        "Live feed session ready"
    );

    Ok((session, endpoints))
}

/// Forward stdin lines as commands until EOF.
///
/// Runs on its own OS thread: blocking terminal reads must not occupy the
/// async runtime. Always ends by sending `Shutdown`.
pub(crate) fn forward_stdin(command_tx: mpsc::Sender<AppCommand>) {
    for line in std::io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!(error = ?e, "Failed to read input");
                break;
            }
        };

        match AppCommand::parse(&line) {
            Some(cmd) => {
                if command_tx.blocking_send(cmd).is_err() {
                    return;
                }
            }
            None if line.trim().is_empty() => {}
            None => println!("Unknown command {:?}, type 'help'", line.trim()),
        }
    }

    let _ = command_tx.blocking_send(AppCommand::Shutdown);
}
