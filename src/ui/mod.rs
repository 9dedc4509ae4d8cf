//! asconfig GTK UI module
//!
//! One window: a toolbar, the playback and capture device lists and
//! the option controls.  Widgets are built in code; all state that
//! outlives a callback lives in the [`Model`](crate::model::Model).

mod controls;
mod device_list;
mod dialogs;
mod utils;
mod window;

pub use window::MainWindow;

use crate::{hardware::DeviceScanner, model::ModelInner, settings::Settings};
use std::{rc::Rc, sync::Arc};

/// Build the main window and fill it with a first scan
///
/// GTK must already be initialised.
pub fn create_ui(settings: Arc<Settings>, scanner: Rc<dyn DeviceScanner>) -> Rc<MainWindow> {
    let model = ModelInner::new(settings.r().ui.options());
    window::create(model, settings, scanner)
}
