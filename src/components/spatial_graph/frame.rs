//! `requestAnimationFrame` loop with an explicit stop.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;

struct Inner {
	handle: Cell<Option<i32>>,
	callback: RefCell<Option<Closure<dyn FnMut()>>>,
}

impl Inner {
	fn schedule(&self) -> Result<(), JsValue> {
		let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
		let callback = self.callback.borrow();
		let Some(cb) = callback.as_ref() else {
			return Ok(());
		};
		let handle = window.request_animation_frame(cb.as_ref().unchecked_ref())?;
		self.handle.set(Some(handle));
		Ok(())
	}
}

/// Owns a self-rescheduling animation frame callback.
///
/// The callback runs once per frame until [`FrameLoop::stop`] is called or the
/// handle is dropped.
pub struct FrameLoop {
	inner: Rc<Inner>,
}

impl FrameLoop {
	pub fn start(mut tick: impl FnMut() + 'static) -> Result<Self, JsValue> {
		let inner = Rc::new(Inner {
			handle: Cell::new(None),
			callback: RefCell::new(None),
		});
		// Weak so the closure does not keep its own owner alive.
		let weak = Rc::downgrade(&inner);
		*inner.callback.borrow_mut() = Some(Closure::new(move || {
			let Some(inner) = weak.upgrade() else {
				return;
			};
			inner.handle.set(None);
			tick();
			if let Err(e) = inner.schedule() {
				log::error!("animation frame request failed: {:?}", e);
			}
		}));
		inner.schedule()?;
		Ok(Self { inner })
	}

	pub fn stop(&self) {
		if let Some(handle) = self.inner.handle.take() {
			if let Some(window) = web_sys::window() {
				let _ = window.cancel_animation_frame(handle);
			}
		}
		// Dropping the closure is safe here: no frame is pending for it.
		if let Ok(mut cb) = self.inner.callback.try_borrow_mut() {
			cb.take();
		}
	}
}

impl Drop for FrameLoop {
	fn drop(&mut self) {
		self.stop();
	}
}
