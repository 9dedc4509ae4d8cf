use super::utils;
use crate::model::{CaptureInterface, Event, Model, PlaybackInterface, Resampler};
use gtk::prelude::*;
use gtk::{CheckButton, ComboBoxText, Grid, Inhibit, Switch};

/// The option grid below the device lists
///
/// Every control writes straight into the model.  The "Stream is
/// default" check box is only sensitive while the model allows it.
pub(super) struct Controls {
    grid: Grid,
}

impl Controls {
    pub(super) fn new(model: &Model) -> Self {
        let grid = utils::grid();
        let opts = model.borrow().options().clone();

        let resampler = combo(
            Resampler::ALL.iter().map(|r| r.name()),
            Resampler::ALL.iter().position(|r| *r == opts.resampler),
        );
        let playback = combo(
            PlaybackInterface::ALL.iter().map(|p| p.name()),
            PlaybackInterface::ALL.iter().position(|p| *p == opts.playback),
        );
        let capture = combo(
            CaptureInterface::ALL.iter().map(|c| c.name()),
            CaptureInterface::ALL.iter().position(|c| *c == opts.capture),
        );
        let stream = Switch::new();
        stream.set_active(opts.stream);
        let stream_default = CheckButton::new();
        stream_default.set_active(opts.stream_default());

        utils::grid_labelled(&grid, "Resampler:", &resampler, 0, 0);
        utils::grid_labelled(&grid, "Playback interface:", &playback, 0, 1);
        utils::grid_labelled(&grid, "Capture interface:", &capture, 0, 2);
        utils::grid_labelled(&grid, "Add stream pcm:", &stream, 0, 3);
        utils::grid_labelled(&grid, "Stream is default:", &stream_default, 2, 3);

        let m = model.clone();
        resampler.connect_changed(move |c| {
            if let Some(r) = c.get_active().and_then(|i| Resampler::ALL.get(i as usize)) {
                m.borrow_mut().update(Event::SetResampler(*r));
            }
        });

        let m = model.clone();
        let check = stream_default.clone();
        playback.connect_changed(move |c| {
            if let Some(p) = c
                .get_active()
                .and_then(|i| PlaybackInterface::ALL.get(i as usize))
            {
                m.borrow_mut().update(Event::SetPlaybackInterface(*p));
                sync_stream_default(&m, &check);
            }
        });

        let m = model.clone();
        capture.connect_changed(move |c| {
            if let Some(ci) = c
                .get_active()
                .and_then(|i| CaptureInterface::ALL.get(i as usize))
            {
                m.borrow_mut().update(Event::SetCaptureInterface(*ci));
            }
        });

        let m = model.clone();
        let check = stream_default.clone();
        stream.connect_state_set(move |_, state| {
            m.borrow_mut().update(Event::SetStream(state));
            sync_stream_default(&m, &check);
            Inhibit(false)
        });

        let m = model.clone();
        stream_default.connect_toggled(move |cb| {
            m.borrow_mut()
                .update(Event::SetStreamDefault(cb.get_active()));
        });

        sync_stream_default(model, &stream_default);
        Self { grid }
    }

    pub(super) fn widget(&self) -> &Grid {
        &self.grid
    }
}

fn combo<'a>(entries: impl Iterator<Item = &'a str>, active: Option<usize>) -> ComboBoxText {
    let c = ComboBoxText::new();
    for e in entries {
        c.append(Some(e), e);
    }
    c.set_active(active.map(|i| i as u32));
    c
}

fn sync_stream_default(model: &Model, check: &CheckButton) {
    let available = model.borrow().options().stream_default_available();
    if !available {
        check.set_active(false);
    }
    check.set_sensitive(available);
}
