//! Sortable table of the PCM devices for one direction

use super::utils;
use crate::hardware::PcmDevice;
use gtk::prelude::*;
use gtk::{CellRendererText, ListStore, ScrolledWindow, TreeView, TreeViewColumn};

const HEADINGS: [&str; 13] = [
    "",
    "Card number",
    "Card ID",
    "Card name",
    "Device number",
    "Device ID",
    "Device name",
    "Min. channels",
    "Max. channels",
    "Min. Rate",
    "Max. rate",
    "Sample formats",
    "Alsa HW path",
];

const COLUMNS: [u32; 14] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13];

/// Hidden column holding the position in the model's device list
const INDEX_COLUMN: i32 = 13;

pub(super) struct DeviceList {
    view: TreeView,
    store: ListStore,
    scroll: ScrolledWindow,
}

impl DeviceList {
    pub(super) fn new() -> Self {
        use glib::Type;

        let store = ListStore::new(&[
            Type::String,
            Type::U32,
            Type::String,
            Type::String,
            Type::U32,
            Type::String,
            Type::String,
            Type::U32,
            Type::U32,
            Type::U32,
            Type::U32,
            Type::String,
            Type::String,
            Type::U32,
        ]);

        let view = TreeView::with_model(&store);
        view.set_search_column(1);

        for (idx, title) in HEADINGS.iter().enumerate() {
            let cell = CellRendererText::new();
            let col = TreeViewColumn::new();
            col.set_title(title);
            col.pack_start(&cell, true);
            col.add_attribute(&cell, "text", idx as i32);
            col.set_sort_column_id(idx as i32);
            view.append_column(&col);
        }

        let scroll = utils::wrap_scroll(&view);
        Self {
            view,
            store,
            scroll,
        }
    }

    pub(super) fn widget(&self) -> &ScrolledWindow {
        &self.scroll
    }

    /// Replace all rows
    pub(super) fn fill(&self, devices: &[PcmDevice]) {
        self.store.clear();

        for (idx, dev) in devices.iter().enumerate() {
            let (min_ch, max_ch, min_rate, max_rate) = dev
                .caps
                .as_ref()
                .map(|c| (c.min_channels, c.max_channels, c.min_rate, c.max_rate))
                .unwrap_or_default();

            self.store.insert_with_values(
                None,
                &COLUMNS,
                &[
                    &dev.status.marker(),
                    &dev.card,
                    &dev.card_id,
                    &dev.card_name,
                    &dev.device,
                    &dev.device_id,
                    &dev.device_name,
                    &min_ch,
                    &max_ch,
                    &min_rate,
                    &max_rate,
                    &dev.formats_csv(),
                    &dev.hw_path,
                    &(idx as u32),
                ],
            );
        }
    }

    /// Position of the selected row in the list that was last filled in
    pub(super) fn selected(&self) -> Option<usize> {
        let (model, iter) = self.view.get_selection().get_selected()?;
        model
            .get_value(&iter, INDEX_COLUMN)
            .get_some::<u32>()
            .ok()
            .map(|idx| idx as usize)
    }
}
