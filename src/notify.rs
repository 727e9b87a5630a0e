/// Holds the host's `on_data_changed` callback for one chart.
///
/// Whether a change actually turns into a repaint is up to the listener.
#[derive(Default)]
pub struct ChangeNotifier {
    listener: Option<Box<dyn FnMut() + Send>>,
}

impl ChangeNotifier {
    pub fn set_listener(&mut self, listener: impl FnMut() + Send + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn has_listener(&self) -> bool {
        self.listener.is_some()
    }

    pub fn notify(&mut self) {
        if let Some(listener) = self.listener.as_mut() {
            listener();
        }
    }
}

impl std::fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("has_listener", &self.has_listener())
            .finish()
    }
}
