//! Browser WASM bindings for the prize wheel
//!
//! `BrowserWheel` renders the widget into a container element, drives the
//! engine from `requestAnimationFrame`, and plays the click tone through
//! Web Audio on every segment crossing.

// Note: This module is already conditionally compiled via #[cfg(feature = "wasm")] in mod.rs

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    console, AudioContext, AudioContextState, Document, Element, OscillatorType, Window,
};

use crate::core::config::WheelConfig;
use crate::core::engine::{FrameHandle, FrameScheduler, SpinObserver, Winner};
use crate::core::tone::{ClickTone, Waveform};
use crate::core::{WheelError, WheelResult};
use crate::wasm::widget::WheelWidget;

type FrameCallback = Closure<dyn FnMut(f64)>;
type ClickCallback = Closure<dyn FnMut()>;
type SharedInner = Rc<RefCell<WheelInner>>;

fn js_message(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

fn to_js(err: WheelError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn browser_error(message: &str) -> JsValue {
    to_js(WheelError::Browser(message.to_string()))
}

/// `requestAnimationFrame` behind the engine's scheduler seam
#[derive(Debug)]
struct RafScheduler {
    window: Window,
    callback: Rc<RefCell<Option<FrameCallback>>>,
}

impl RafScheduler {
    fn now_ms(&self) -> f64 {
        self.window.performance().map_or(0.0, |p| p.now())
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&mut self) -> WheelResult<FrameHandle> {
        let slot = self.callback.borrow();
        let callback = slot
            .as_ref()
            .ok_or_else(|| WheelError::Scheduler("frame callback released".to_string()))?;
        self.window
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .map(FrameHandle)
            .map_err(|e| WheelError::Scheduler(js_message(&e)))
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if let Err(e) = self.window.cancel_animation_frame(handle.0) {
            console::warn_1(&e);
        }
    }
}

fn oscillator_type(waveform: Waveform) -> OscillatorType {
    match waveform {
        Waveform::Sine => OscillatorType::Sine,
        Waveform::Square => OscillatorType::Square,
        Waveform::Triangle => OscillatorType::Triangle,
    }
}

/// Plays the click tone; the audio context is created on first use
#[derive(Debug)]
struct ClickPlayer {
    tone: ClickTone,
    context: Option<AudioContext>,
}

impl ClickPlayer {
    fn new(tone: ClickTone) -> Self {
        Self {
            tone,
            context: None,
        }
    }

    fn play(&mut self) -> Result<(), JsValue> {
        if self.context.is_none() {
            self.context = Some(AudioContext::new()?);
        }
        let Some(ctx) = &self.context else {
            return Ok(());
        };

        // Autoplay policy keeps contexts suspended until a user gesture
        if ctx.state() == AudioContextState::Suspended {
            let _ = ctx.resume()?;
        }

        let oscillator = ctx.create_oscillator()?;
        let gain = ctx.create_gain()?;
        oscillator.connect_with_audio_node(&gain)?;
        gain.connect_with_audio_node(&ctx.destination())?;

        let (start, stop) = self.tone.window(ctx.current_time());
        oscillator.set_type(oscillator_type(self.tone.waveform));
        oscillator
            .frequency()
            .set_value_at_time(self.tone.frequency_hz, start)?;

        let envelope = gain.gain();
        envelope.set_value_at_time(self.tone.peak_gain, start)?;
        envelope.exponential_ramp_to_value_at_time(self.tone.floor_gain, stop)?;

        oscillator.start_with_when(start)?;
        oscillator.stop_with_when(stop)?;
        Ok(())
    }

    fn close(&mut self) {
        if let Some(ctx) = self.context.take() {
            if let Err(e) = ctx.close() {
                console::warn_1(&e);
            }
        }
    }
}

/// Page-side feedback for one frame
struct PageFeedback<'a> {
    player: &'a mut ClickPlayer,
    finished: Option<Winner>,
}

impl SpinObserver for PageFeedback<'_> {
    fn on_tick(&mut self) {
        if let Err(e) = self.player.play() {
            console::warn_1(&e);
        }
    }

    fn on_spin_end(&mut self, winner: &Winner) {
        self.finished = Some(winner.clone());
    }
}

#[derive(Debug)]
struct WheelInner {
    widget: WheelWidget,
    scheduler: RafScheduler,
    player: ClickPlayer,
    document: Document,
    on_spin_end: Option<js_sys::Function>,
    listeners: Vec<(Element, ClickCallback)>,
}

impl WheelInner {
    fn element(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    /// Mirrors rotation, button, and result into the page
    fn render(&self) {
        if let Some(wheel) = self.element(&self.widget.wheel_id()) {
            if let Err(e) = wheel.set_attribute("style", &self.widget.wheel_style()) {
                console::warn_1(&e);
            }
        }
        if let Some(button) = self.element(&self.widget.button_id()) {
            button.set_text_content(Some(self.widget.button_label()));
            let toggled = if self.widget.button_disabled() {
                button.set_attribute("disabled", "disabled")
            } else {
                button.remove_attribute("disabled")
            };
            if let Err(e) = toggled {
                console::warn_1(&e);
            }
        }
        if let Some(result) = self.element(&self.widget.result_id()) {
            result.set_text_content(Some(&self.widget.result_text()));
        }
    }
}

fn winner_to_js(winner: &Winner) -> JsValue {
    let obj = js_sys::Object::new();
    let _ = js_sys::Reflect::set(&obj, &"label".into(), &winner.label.as_str().into());
    let _ = js_sys::Reflect::set(&obj, &"index".into(), &(winner.index as f64).into());
    obj.into()
}

fn handle_frame(weak: &Weak<RefCell<WheelInner>>, timestamp_ms: f64) {
    let Some(inner) = weak.upgrade() else {
        return;
    };
    let (finished, callback) = {
        let Ok(mut guard) = inner.try_borrow_mut() else {
            return;
        };
        let state = &mut *guard;
        let mut feedback = PageFeedback {
            player: &mut state.player,
            finished: None,
        };
        if let Err(e) = state
            .widget
            .frame_with(timestamp_ms, &mut state.scheduler, &mut feedback)
        {
            console::error_1(&e.to_string().into());
        }
        let finished = feedback.finished;
        state.render();
        (finished, state.on_spin_end.clone())
    };

    // Called with the state released so the callback may spin again
    if let (Some(winner), Some(callback)) = (finished, callback) {
        if let Err(e) = callback.call1(&JsValue::NULL, &winner_to_js(&winner)) {
            console::error_1(&e);
        }
    }
}

fn handle_click(weak: &Weak<RefCell<WheelInner>>) {
    let Some(inner) = weak.upgrade() else {
        return;
    };
    let Ok(mut guard) = inner.try_borrow_mut() else {
        return;
    };
    let state = &mut *guard;
    let now = state.scheduler.now_ms();
    match state.widget.click(now, &mut state.scheduler) {
        Ok(_) => state.render(),
        Err(e) => console::error_1(&e.to_string().into()),
    }
}

fn attach_click_listeners(inner: &SharedInner) -> Result<(), JsValue> {
    let mut state = inner.borrow_mut();
    let ids = [state.widget.wheel_id(), state.widget.button_id()];
    for id in ids {
        let Some(element) = state.element(&id) else {
            continue;
        };
        let weak = Rc::downgrade(inner);
        let listener: ClickCallback =
            Closure::wrap(Box::new(move || handle_click(&weak)) as Box<dyn FnMut()>);
        element.add_event_listener_with_callback("click", listener.as_ref().unchecked_ref())?;
        state.listeners.push((element, listener));
    }
    Ok(())
}

/// Seed drawn from the page's generator
fn page_seed() -> u64 {
    // 2^53 keeps every bit of the float's mantissa
    (js_sys::Math::random() * 9_007_199_254_740_992.0) as u64
}

/// Browser prize wheel - the main WASM entry point
#[derive(Debug)]
#[wasm_bindgen]
pub struct BrowserWheel {
    inner: SharedInner,
}

#[wasm_bindgen]
impl BrowserWheel {
    /// Render a wheel into the element with id `container_id`
    ///
    /// `config_json` follows `WheelConfig`; omitted fields take defaults and
    /// an omitted config shows the default prizes.
    #[wasm_bindgen(constructor)]
    pub fn new(container_id: &str, config_json: Option<String>) -> Result<BrowserWheel, JsValue> {
        console_error_panic_hook::set_once();

        let mut config = match config_json.as_deref() {
            Some(json) => WheelConfig::from_json(json).map_err(to_js)?,
            None => WheelConfig::default(),
        };
        if config.seed.is_none() {
            config.seed = Some(page_seed());
        }

        let window = web_sys::window().ok_or_else(|| browser_error("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| browser_error("no document"))?;
        let container = document
            .get_element_by_id(container_id)
            .ok_or_else(|| browser_error(&format!("no element #{container_id}")))?;

        let widget = WheelWidget::with_prefix(config, container_id).map_err(to_js)?;
        container.set_inner_html(&widget.to_markup().render());

        let callback = Rc::new(RefCell::new(None));
        let inner = Rc::new(RefCell::new(WheelInner {
            widget,
            scheduler: RafScheduler {
                window,
                callback: Rc::clone(&callback),
            },
            player: ClickPlayer::new(ClickTone::default()),
            document,
            on_spin_end: None,
            listeners: Vec::new(),
        }));

        // The closure holds a weak handle so dropping the wheel frees everything
        let weak = Rc::downgrade(&inner);
        *callback.borrow_mut() = Some(Closure::wrap(
            Box::new(move |ts: f64| handle_frame(&weak, ts)) as Box<dyn FnMut(f64)>,
        ));

        attach_click_listeners(&inner)?;
        Ok(Self { inner })
    }

    /// Start a spin; returns false if one is already running
    pub fn spin(&self) -> Result<bool, JsValue> {
        let mut guard = self
            .inner
            .try_borrow_mut()
            .map_err(|_| browser_error("wheel is busy"))?;
        let state = &mut *guard;
        let now = state.scheduler.now_ms();
        let started = state
            .widget
            .click(now, &mut state.scheduler)
            .map_err(to_js)?;
        state.render();
        Ok(started)
    }

    /// Current rotation in degrees
    #[wasm_bindgen(getter)]
    pub fn rotation(&self) -> f64 {
        self.inner
            .try_borrow()
            .map_or(0.0, |s| s.widget.engine().rotation())
    }

    /// Whether a spin is in flight
    #[wasm_bindgen(getter, js_name = isSpinning)]
    pub fn is_spinning(&self) -> bool {
        self.inner
            .try_borrow()
            .is_ok_and(|s| s.widget.engine().is_spinning())
    }

    /// Label of the last winner
    #[wasm_bindgen(getter, js_name = winnerLabel)]
    pub fn winner_label(&self) -> Option<String> {
        let state = self.inner.try_borrow().ok()?;
        state.widget.last_winner().map(|w| w.label.clone())
    }

    /// Register `callback({ label, index })`, called once per finished spin
    #[wasm_bindgen(js_name = setOnSpinEnd)]
    pub fn set_on_spin_end(&self, callback: js_sys::Function) {
        if let Ok(mut state) = self.inner.try_borrow_mut() {
            state.on_spin_end = Some(callback);
        }
    }

    /// Cancel any pending frame, detach listeners, and close audio
    pub fn destroy(&self) {
        let Ok(mut guard) = self.inner.try_borrow_mut() else {
            return;
        };
        let state = &mut *guard;
        state.widget.teardown(&mut state.scheduler);
        for (element, listener) in state.listeners.drain(..) {
            let _ = element
                .remove_event_listener_with_callback("click", listener.as_ref().unchecked_ref());
        }
        state.player.close();
    }
}

impl Drop for BrowserWheel {
    fn drop(&mut self) {
        self.destroy();
    }
}

/// Initialize the wheel module in the browser
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    console::log_1(&"Prize wheel WASM initialized".into());
}
