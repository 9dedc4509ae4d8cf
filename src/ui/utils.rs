use glib::object::IsA;
use gtk::prelude::*;
use gtk::{Adjustment, Align, Grid, Label, PolicyType, ScrolledWindow, ShadowType, Widget};

pub(super) fn grid() -> Grid {
    let grid = Grid::new();
    grid.set_row_spacing(4);
    grid.set_column_spacing(4);
    grid.set_border_width(8);
    grid
}

pub(super) fn wrap_scroll<P: IsA<Widget>>(widget: &P) -> ScrolledWindow {
    let sw = ScrolledWindow::new::<Adjustment, Adjustment>(None, None);
    sw.set_shadow_type(ShadowType::EtchedIn);
    sw.set_policy(PolicyType::Automatic, PolicyType::Automatic);
    sw.add(widget);
    sw
}

/// A left aligned label above a device list
pub(super) fn heading(text: &str) -> Label {
    let l = Label::new(Some(text));
    l.set_halign(Align::Start);
    l.set_margin_top(5);
    l.set_margin_bottom(5);
    l
}

/// Attach `widget` to the grid with a label to its left
pub(super) fn grid_labelled<P: IsA<Widget>>(grid: &Grid, text: &str, widget: &P, left: i32, top: i32) {
    let l = Label::new(Some(text));
    l.set_halign(Align::End);
    grid.attach(&l, left, top, 1, 1);
    grid.attach(widget, left + 1, top, 1, 1);
}
