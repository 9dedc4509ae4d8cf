use gtk::prelude::*;
use gtk::{
    ButtonsType, Dialog, DialogFlags, Label, MessageDialog, MessageType, ResponseType, Window,
};

/// Show a modal message with an OK button
pub(super) fn msgbox(parent: &Window, msg: &str, title: &str, kind: MessageType) {
    let dialog = MessageDialog::new(
        Some(parent),
        DialogFlags::DESTROY_WITH_PARENT,
        kind,
        ButtonsType::Ok,
        msg,
    );
    dialog.set_title(title);
    dialog.show_all();
    dialog.run();
    dialog.close();
}

/// Ask a Yes/No question, `msg` may contain pango markup
pub(super) fn actionbox(parent: &Window, msg: &str, title: &str) -> ResponseType {
    let dialog = Dialog::with_buttons(
        Some(title),
        Some(parent),
        DialogFlags::MODAL | DialogFlags::DESTROY_WITH_PARENT,
        &[("_No", ResponseType::No), ("_Yes", ResponseType::Yes)],
    );
    dialog.set_default_response(ResponseType::Yes);

    let heading = Label::new(None);
    heading.set_markup(&format!(
        "\n<b><span size=\"large\">{}:</span></b>\n",
        glib::markup_escape_text(title)
    ));
    let body = Label::new(None);
    body.set_markup(msg);

    let area = dialog.get_content_area();
    area.add(&heading);
    area.add(&body);

    dialog.show_all();
    let response = dialog.run();
    dialog.close();
    response
}
