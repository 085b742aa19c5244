use crate::config::{self, Overrides};
use crate::events::AppEvent;
use crate::geometry::{Point, Viewport};
use crate::gui::presentation::{ClickAction, Presentation};
use crate::gui::sections::NavKey;
use crate::gui::theme::{self, ThemeColors};
use crate::gui::ticker::FrameTicker;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

pub struct AppModel {
    pub presentation: Rc<RefCell<Presentation>>,
    pub config_path: PathBuf,
    pub overrides: Overrides,
    pub ticker: FrameTicker,
    pub root: gtk::ApplicationWindow,
    pub drawing_area: gtk::DrawingArea,
}

pub struct AppInit {
    pub presentation: Presentation,
    pub config_path: PathBuf,
    pub overrides: Overrides,
    pub events: async_channel::Receiver<AppEvent>,
}

#[derive(Debug)]
pub enum AppMsg {
    Key(NavKey),
    Wheel(f64),
    Click(Point),
    PointerMove(Point),
    Resize(Viewport),
    ConfigReload,
    Quit,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = AppInit;
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Parallax"),
            set_default_size: (1280, 800),
            add_css_class: "parallax-window",

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::Escape {
                        sender.input(AppMsg::Quit);
                        return glib::Propagation::Stop;
                    }
                    match key.name().and_then(|name| NavKey::from_name(&name)) {
                        Some(nav) => {
                            sender.input(AppMsg::Key(nav));
                            glib::Propagation::Stop
                        }
                        None => glib::Propagation::Proceed,
                    }
                }
            },

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,
                set_focusable: true,
                add_css_class: "parallax-stage",

                connect_resize[sender] => move |_, width, height| {
                    sender.input(AppMsg::Resize(Viewport::new(width as f64, height as f64)));
                },

                add_controller = gtk::EventControllerMotion {
                    connect_motion[sender] => move |_, x, y| {
                        sender.input(AppMsg::PointerMove(Point::new(x, y)));
                    }
                },

                add_controller = gtk::GestureClick {
                    set_button: 1, // primary only
                    connect_released[sender] => move |_, _, x, y| {
                        sender.input(AppMsg::Click(Point::new(x, y)));
                    }
                },

                add_controller = gtk::EventControllerScroll::new(
                    gtk::EventControllerScrollFlags::VERTICAL
                ) {
                    connect_scroll[sender] => move |_, _, dy| {
                        sender.input(AppMsg::Wheel(dy));
                        glib::Propagation::Stop
                    }
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let AppInit {
            presentation,
            config_path,
            overrides,
            events,
        } = init;

        theme::load_css();

        let presentation = Rc::new(RefCell::new(presentation));

        let model = AppModel {
            presentation: presentation.clone(),
            config_path,
            overrides,
            ticker: FrameTicker::default(),
            root: root.clone(),
            drawing_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let presentation_draw = presentation.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, _, _| {
                let colors = ThemeColors::from_context(&drawing_area.style_context());
                if let Err(e) = presentation_draw.borrow().draw(cr, &colors) {
                    log::error!("Drawing error: {}", e);
                }
            });

        presentation.borrow_mut().start();
        let presentation_tick = presentation.clone();
        model.ticker.start(&widgets.drawing_area, move |now| {
            presentation_tick.borrow_mut().frame(now);
        });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = events.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        widgets.drawing_area.grab_focus();

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Key(key) => {
                self.presentation.borrow_mut().key(key);
            }
            AppMsg::Wheel(dy) => {
                self.presentation.borrow_mut().wheel(dy);
            }
            AppMsg::Click(point) => {
                let action = self.presentation.borrow_mut().click(point);
                if let ClickAction::Open(link) = action {
                    log::info!("Opening {}", link);
                    if let Err(e) = std::process::Command::new("xdg-open")
                        .arg(link.as_str())
                        .spawn()
                    {
                        log::error!("Failed to open '{}': {}", link, e);
                    }
                }
            }
            AppMsg::PointerMove(point) => {
                self.presentation.borrow_mut().pointer_moved(point);
            }
            AppMsg::Resize(viewport) => {
                self.presentation.borrow_mut().resize(viewport);
            }
            AppMsg::ConfigReload => match config::load_config(&self.config_path) {
                Ok(mut new_config) => {
                    self.overrides.apply(&mut new_config);
                    self.presentation.borrow_mut().reload(&new_config);
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
            AppMsg::Quit => self.root.close(),
        }
        self.drawing_area.queue_draw();
    }

    fn shutdown(&mut self, _widgets: &mut Self::Widgets, _output: relm4::Sender<Self::Output>) {
        self.ticker.stop();
        self.presentation.borrow_mut().stop();
    }
}
