use crate::config::{self, Config};
use crate::events::AppEvent;
use crate::gui::theme::ThemeColors;
use crate::gui::wheel;
use crate::gui::window;
use gtk::prelude::*;
use gtk4 as gtk;
use gyre::{Point, PointerEvent, Wheel};
use relm4::prelude::*;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

pub struct AppModel {
    pub wheel: Rc<RefCell<Wheel>>,
    pub config: Rc<RefCell<Config>>,
    pub config_path: Option<PathBuf>,
    pub size: (f64, f64),
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    Pointer(PointerEvent),
    Resize(i32, i32),
    Reset,
    Quit,
    ConfigReload,
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
    type Init = (
        Wheel,
        Config,
        Option<PathBuf>,
        async_channel::Receiver<AppEvent>,
    );
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Wheel"),
            set_default_width: 800,
            set_default_height: 800,

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::Escape {
                        sender.input(AppMsg::Quit);
                        return glib::Propagation::Stop;
                    }
                    if key == gtk::gdk::Key::r || key == gtk::gdk::Key::R {
                        sender.input(AppMsg::Reset);
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,
                set_cursor_from_name: Some(wheel::IDLE_CURSOR),

                connect_resize[sender] => move |_, width, height| {
                    sender.input(AppMsg::Resize(width, height));
                },

                // Covers both mouse and touch input.
                add_controller = gtk::GestureDrag {
                    connect_drag_begin[sender] => move |_, x, y| {
                        sender.input(AppMsg::Pointer(PointerEvent::Start(Point::new(x, y))));
                    },
                    connect_drag_update[sender] => move |gesture, dx, dy| {
                        if let Some((x, y)) = gesture.start_point() {
                            let point = Point::new(x + dx, y + dy);
                            sender.input(AppMsg::Pointer(PointerEvent::Move(point)));
                        }
                    },
                    connect_drag_end[sender] => move |_, _, _| {
                        sender.input(AppMsg::Pointer(PointerEvent::End));
                    },
                    connect_cancel[sender] => move |_, _| {
                        sender.input(AppMsg::Pointer(PointerEvent::Cancel));
                    },
                },
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (initial_wheel, initial_config, config_path, rx) = init;

        let model = AppModel {
            wheel: Rc::new(RefCell::new(initial_wheel)),
            config: Rc::new(RefCell::new(initial_config)),
            config_path,
            size: (0.0, 0.0),
            drawing_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let wheel_draw = model.wheel.clone();
        let config_draw = model.config.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, _, _| {
                let style_context = drawing_area.style_context();
                let colors = ThemeColors::from_context(&style_context);
                let config = config_draw.borrow();
                if let Err(e) = wheel::draw(
                    cr,
                    &wheel_draw.borrow(),
                    &config.typography,
                    colors.background,
                ) {
                    log::error!("Drawing error: {}", e);
                }
            });

        // Easing runs in the frame clock's update phase, before the paint phase
        // draws the result.
        let wheel_tick = model.wheel.clone();
        widgets
            .drawing_area
            .add_tick_callback(move |drawing_area, _clock| {
                if wheel_tick.borrow_mut().tick() {
                    drawing_area.queue_draw();
                }
                glib::ControlFlow::Continue
            });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Pointer(event) => {
                let changed = self.wheel.borrow_mut().handle(event);
                let dragging = self.wheel.borrow().interaction().is_dragging();
                window::set_drag_cursor(&self.drawing_area, dragging);
                if changed {
                    self.drawing_area.queue_draw();
                }
            }
            AppMsg::Resize(width, height) => {
                self.size = (f64::from(width), f64::from(height));
                let fill = self.config.borrow().viewport.fill;
                self.wheel
                    .borrow_mut()
                    .resize(self.size.0, self.size.1, fill);
                self.drawing_area.queue_draw();
            }
            AppMsg::Reset => {
                self.wheel.borrow_mut().reset();
                self.drawing_area.queue_draw();
            }
            AppMsg::Quit => relm4::main_application().quit(),
            AppMsg::ConfigReload => self.reload_config(),
        }
    }
}

impl AppModel {
    fn reload_config(&mut self) {
        let loaded = config::load_config(self.config_path.as_deref())
            .and_then(|c| Ok((c.build_wheel()?, c)));

        match loaded {
            Ok((mut new_wheel, new_config)) => {
                let (width, height) = self.size;
                new_wheel.resize(width, height, new_config.viewport.fill);
                *self.wheel.borrow_mut() = new_wheel;
                *self.config.borrow_mut() = new_config;
                window::set_drag_cursor(&self.drawing_area, false);
                self.drawing_area.queue_draw();
                log::info!("Configuration reloaded");
            }
            Err(e) => log::error!("Failed to reload config, keeping current wheel: {}", e),
        }
    }
}
