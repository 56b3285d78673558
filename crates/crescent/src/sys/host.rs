//! Owns the menu and a simulated viewport, turning control commands into
//! menu events and feeding the menu's scroll commands back as the scroll
//! events a real list would raise.

use crate::catalog::ContentItem;
use crate::config::{self, Config};
use crate::events::AppEvent;
use crate::grid::{GridPanel, PageIndicator};
use crate::menu::{
    CircularSelector, KeyValueStore, Listeners, Menu, MenuEvent, MenuOption, MenuResponse, Phase,
};
use crate::sys::protocol::Command;
use crate::sys::viewport::SimViewport;
use async_channel::Receiver;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::time::Instant;

/// Reply to every command.
#[derive(Debug, Clone, PartialEq)]
pub struct Status {
    pub phase: Phase,
    pub selected: Option<(usize, MenuOption)>,
    pub offset: f64,
    pub page: PageIndicator,
    pub items: Vec<ContentItem>,
    pub last_click: Option<MenuOption>,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let phase = match self.phase {
            Phase::Collapsed => "collapsed",
            Phase::Expanded => "expanded",
        };
        write!(f, "{}", phase)?;
        match &self.selected {
            Some((index, option)) => write!(f, " selected={}:{}", index, option.label)?,
            None => write!(f, " selected=-")?,
        }
        write!(
            f,
            " offset={:.1} page={} items={}",
            self.offset,
            self.page,
            self.items.len()
        )?;
        if let Some(option) = &self.last_click {
            write!(f, " clicked={}", option.label)?;
        }
        Ok(())
    }
}

pub struct Host<S> {
    menu: Menu<S>,
    viewport: SimViewport,
    listening: bool,
    last_click: Rc<RefCell<Option<MenuOption>>>,
}

impl<S: KeyValueStore> Host<S> {
    pub fn new(config: &Config, store: S) -> Self {
        let last_click = Rc::new(RefCell::new(None));
        let sink = last_click.clone();

        let selector = CircularSelector::new(config.options.clone(), store);
        let grid = GridPanel::new(config.layout.grid, config.layout.ellipse);
        let menu = Menu::new(
            selector,
            grid,
            config.catalog(),
            config.layout.bounds,
            config.layout.container_height,
        )
        .on_option_click(move |option| {
            log::info!("Option clicked: {} ({})", option.label, option.id);
            *sink.borrow_mut() = Some(option.clone());
        });

        let viewport = SimViewport::new(
            menu.container_height(),
            menu.selector().content_height(),
        );

        Self {
            menu,
            viewport,
            listening: false,
            last_click,
        }
    }

    pub fn menu(&self) -> &Menu<S> {
        &self.menu
    }

    pub fn viewport(&self) -> &SimViewport {
        &self.viewport
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn dispatch(&mut self, command: Command, now: Instant) -> Status {
        log::debug!("Command: {}", command);
        match command {
            Command::Toggle => self.send(MenuEvent::Toggle, now),
            Command::Expand => self.send(MenuEvent::Expand, now),
            Command::Collapse => self.send(MenuEvent::Collapse, now),
            Command::Scroll(dy) => {
                if self.listening {
                    // the interrupted animation will never report completion
                    if self.viewport.is_animating() {
                        self.send(MenuEvent::ScrollComplete, now);
                    }
                    let metrics = self.viewport.scroll_by(dy);
                    self.send(MenuEvent::Scroll(metrics), now);
                }
            }
            Command::Leave => self.send(MenuEvent::PointerLeave, now),
            Command::Pick(row) => self.send(MenuEvent::Pick(row), now),
            Command::Click(at) => {
                self.send(MenuEvent::PointerDown(at), now);
                self.send(MenuEvent::PointerUp, now);
            }
            Command::Swipe { from, to } => {
                self.send(MenuEvent::PointerDown(from), now);
                self.send(MenuEvent::PointerMove(to), now);
                self.send(MenuEvent::PointerUp, now);
            }
            Command::Prev => self.send(MenuEvent::PrevPage, now),
            Command::Next => self.send(MenuEvent::NextPage, now),
            Command::Status => {}
        }
        self.status()
    }

    pub fn status(&self) -> Status {
        let page = self.menu.render_grid();
        let selector = self.menu.selector();
        Status {
            phase: self.menu.phase(),
            selected: selector
                .selected()
                .map(|o| (selector.selected_index(), o.clone())),
            offset: self.viewport.offset(),
            page: page.indicator,
            items: page.items().cloned().collect(),
            last_click: self.last_click.borrow().clone(),
        }
    }

    /// Earliest of the next animation frame and the menu's next deadline.
    pub fn next_wake(&self) -> Option<Instant> {
        match (self.viewport.next_frame(), self.menu.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn tick(&mut self, now: Instant) {
        if let Some(frame) = self.viewport.tick(now) {
            self.send(MenuEvent::Scroll(frame.metrics), now);
            if frame.finished {
                self.send(MenuEvent::ScrollComplete, now);
            }
        }
        let resp = self.menu.poll(now);
        self.apply(resp, now);
    }

    pub fn reload(&mut self, config: &Config, now: Instant) {
        log::info!("Reloading config ({} options)", config.options.len());
        self.menu.set_catalog(config.catalog());
        self.menu
            .set_grid(GridPanel::new(config.layout.grid, config.layout.ellipse));
        let resp = self.menu.set_options(config.options.clone(), now);
        self.viewport
            .set_scroll_height(self.menu.selector().content_height());
        self.apply(resp, now);
    }

    fn send(&mut self, event: MenuEvent, now: Instant) {
        let resp = self.menu.handle(event, now);
        self.apply(resp, now);
    }

    fn apply(&mut self, resp: MenuResponse, now: Instant) {
        match resp.listeners {
            Some(Listeners::Attach) => {
                self.listening = true;
                self.viewport
                    .set_scroll_height(self.menu.selector().content_height());
            }
            Some(Listeners::Detach) => {
                self.listening = false;
                self.viewport.stop();
            }
            None => {}
        }

        if let Some(index) = resp.selection_changed {
            log::debug!("Selection -> {}", index);
        }

        let Some(command) = resp.command else {
            return;
        };
        if let Some(metrics) = self.viewport.apply(command, now) {
            // an instant jump still raises a scroll event
            self.send(MenuEvent::Scroll(metrics), now);
        }
    }
}

pub async fn run<S: KeyValueStore>(mut host: Host<S>, rx: Receiver<AppEvent>) {
    loop {
        let wake = host.next_wake();
        tokio::select! {
            event = rx.recv() => match event {
                Ok(AppEvent::Command { command, reply }) => {
                    let status = host.dispatch(command, Instant::now());
                    let _ = reply.send(status.to_string()).await;
                }
                Ok(AppEvent::ConfigReload) => {
                    host.reload(&config::load_or_default(), Instant::now());
                }
                Err(_) => break,
            },
            _ = sleep_until(wake) => host.tick(Instant::now()),
        }
    }
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(tokio::time::Instant::from_std(at)).await,
        None => std::future::pending().await,
    }
}
