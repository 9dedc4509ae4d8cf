use super::{controls::Controls, device_list::DeviceList, dialogs, utils};
use crate::{
    asoundrc,
    error::SaveError,
    hardware::{DeviceListing, DeviceScanner},
    model::{Event, Model},
    settings::Settings,
};
use gtk::prelude::*;
use gtk::{
    IconSize, Image, Inhibit, MessageType, Orientation, ResponseType, ToolButton, Toolbar,
    ToolbarStyle, Window, WindowType,
};
use std::{path::Path, rc::Rc, sync::Arc};
use tracing::{error, info, warn};

const TITLE: &str = "asconfig";
const BORDER: u32 = 8;
const SPACING: i32 = 8;
const DEFAULT_SIZE: (i32, i32) = (280, 250);

pub struct MainWindow {
    inner: Window,
    playback: DeviceList,
    capture: DeviceList,
    model: Model,
    settings: Arc<Settings>,
    scanner: Rc<dyn DeviceScanner>,
}

impl MainWindow {
    fn new(model: Model, settings: Arc<Settings>, scanner: Rc<dyn DeviceScanner>) -> Rc<Self> {
        let inner = Window::new(WindowType::Toplevel);
        inner.set_title(TITLE);
        inner.set_border_width(BORDER);
        inner.set_default_size(DEFAULT_SIZE.0, DEFAULT_SIZE.1);
        inner.connect_delete_event(|_, _| {
            gtk::main_quit();
            Inhibit(false)
        });

        let vbox = gtk::Box::new(Orientation::Vertical, SPACING);
        inner.add(&vbox);

        let toolbar = Toolbar::new();
        toolbar.set_style(ToolbarStyle::Icons);
        vbox.pack_start(&toolbar, false, false, 0);
        let refresh = tool_button("view-refresh", "Refresh");
        let save = tool_button("document-save", "Save");
        toolbar.insert(&refresh, -1);
        toolbar.insert(&save, -1);

        let playback = DeviceList::new();
        let capture = DeviceList::new();
        vbox.pack_start(&utils::heading("Select playback device:"), false, false, 0);
        vbox.pack_start(playback.widget(), true, true, 0);
        vbox.pack_start(&utils::heading("Select capture device:"), false, false, 0);
        vbox.pack_start(capture.widget(), true, true, 0);

        let controls = Controls::new(&model);
        vbox.add(controls.widget());

        let this = Rc::new(Self {
            inner,
            playback,
            capture,
            model,
            settings,
            scanner,
        });

        let win = Rc::clone(&this);
        refresh.connect_clicked(move |_| win.refresh());
        let win = Rc::clone(&this);
        save.connect_clicked(move |_| win.save());

        this
    }

    pub fn show(&self) {
        self.inner.show_all();
    }

    /// Rescan both directions and redraw the lists
    pub fn refresh(&self) {
        let DeviceListing { playback, capture } = DeviceListing::scan(&*self.scanner);

        self.playback.fill(&playback);
        self.capture.fill(&capture);
        self.model
            .borrow_mut()
            .update(Event::Refresh { playback, capture });
    }

    fn save(&self) {
        let text = {
            let model = self.model.borrow();
            asoundrc::prepare_save(
                &model,
                self.playback.selected(),
                self.capture.selected(),
                &self.settings.r(),
            )
        };

        let text = match text {
            Ok(t) => t,
            Err(e) => {
                let kind = match e {
                    SaveError::NoPlayback => MessageType::Info,
                    _ => MessageType::Error,
                };
                warn!("{}", e);
                dialogs::msgbox(&self.inner, &e.to_string(), TITLE, kind);
                return;
            }
        };

        let path = match self.settings.r().output_path() {
            Some(p) => p,
            None => {
                error!("No home directory to write .asoundrc to");
                dialogs::msgbox(
                    &self.inner,
                    "Can't find your home directory: not writing asoundrc!",
                    TITLE,
                    MessageType::Error,
                );
                return;
            }
        };

        if path.exists() {
            let answer = dialogs::actionbox(&self.inner, &overwrite_prompt(&path), "Overwrite");
            if answer != ResponseType::Yes {
                info!("Keeping existing {}", path.display());
                return;
            }
        }

        if let Err(e) = asoundrc::write_config(&path, &text) {
            error!("{}", e);
            dialogs::msgbox(&self.inner, &e.to_string(), TITLE, MessageType::Error);
        }
    }
}

/// Pango markup asking whether `path` may be replaced
fn overwrite_prompt(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_else(|| path.to_string_lossy());
    format!(
        "User alsa config file <i>{}</i> exists. <b>Overwrite?</b>",
        glib::markup_escape_text(&name)
    )
}

fn tool_button(icon: &str, label: &str) -> ToolButton {
    let img = Image::from_icon_name(Some(icon), IconSize::LargeToolbar);
    ToolButton::new(Some(&img), Some(label))
}

pub(super) fn create(
    model: Model,
    settings: Arc<Settings>,
    scanner: Rc<dyn DeviceScanner>,
) -> Rc<MainWindow> {
    let win = MainWindow::new(model, settings, scanner);
    win.refresh();
    win
}
