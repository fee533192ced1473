//! picamera.js Transport
//!
//! `index.html` loads `picamera.js` as an ES module and publishes its
//! `PiCamera` class and `ChannelId` enum on `window`. Each library callback
//! becomes a [`TransportEvent`] tagged with the epoch of the transport that
//! produced it.

use js_sys::{Function, Object, Reflect};
use simplebot_core::{
    Epoch, PeerState, StreamConfig, StreamingTransport, TransportError, TransportEvent,
};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlVideoElement, MediaStream};

/// Id of the `<video>` element the stream is attached to
pub const VIDEO_ELEMENT_ID: &str = "piCameraVideoElement";

/// Receives events from the streaming client
pub type EventSink = Rc<dyn Fn(Epoch, TransportEvent)>;

#[wasm_bindgen]
extern "C" {
    type PiCamera;

    #[wasm_bindgen(constructor, catch)]
    fn new(options: &Object) -> Result<PiCamera, JsValue>;

    #[wasm_bindgen(method, catch)]
    fn connect(this: &PiCamera) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = sendMessage)]
    fn send_message(this: &PiCamera, message: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch)]
    fn terminate(this: &PiCamera) -> Result<(), JsValue>;

    #[wasm_bindgen(method, setter = onStream)]
    fn set_on_stream(this: &PiCamera, callback: &Function);

    #[wasm_bindgen(method, setter = onTimeout)]
    fn set_on_timeout(this: &PiCamera, callback: &Function);

    #[wasm_bindgen(method, setter = onConnectionState)]
    fn set_on_connection_state(this: &PiCamera, callback: &Function);

    #[wasm_bindgen(method, setter = onDatachannel)]
    fn set_on_datachannel(this: &PiCamera, callback: &Function);

    #[wasm_bindgen(method, setter = onMessage)]
    fn set_on_message(this: &PiCamera, callback: &Function);
}

/// One `PiCamera` connection
pub struct PiCameraTransport {
    camera: PiCamera,
    /// Closures handed to the library; freed when the client is terminated
    callbacks: Vec<Callback>,
}

type Callback = Closure<dyn FnMut(JsValue)>;

impl PiCameraTransport {
    /// Build a client for `config`, sending its callbacks to `sink`
    pub fn new(config: &StreamConfig, epoch: Epoch, sink: EventSink) -> Result<Self, TransportError> {
        let options = client_options(config)?;
        let camera = PiCamera::new(&options).map_err(|e| {
            TransportError::Unavailable(format!("picamera.js is not loaded: {}", describe(&e)))
        })?;
        let callbacks = attach_callbacks(&camera, epoch, sink);
        Ok(Self {
            camera,
            callbacks,
        })
    }

    /// Point the library at no-op handlers, then free the closures
    fn detach_callbacks(&mut self) {
        if !self.callbacks.is_empty() {
            let noop = Function::new_no_args("");
            self.camera.set_on_stream(&noop);
            self.camera.set_on_timeout(&noop);
            self.camera.set_on_connection_state(&noop);
            self.camera.set_on_datachannel(&noop);
            self.camera.set_on_message(&noop);
            self.callbacks.clear();
        }
    }
}

impl StreamingTransport for PiCameraTransport {
    fn connect(&mut self) -> Result<(), TransportError> {
        self.camera
            .connect()
            .map_err(|e| TransportError::Unavailable(describe(&e)))
    }

    fn send_message(&mut self, message: &str) -> Result<(), TransportError> {
        web_sys::console::log_1(&format!("Sending command: {}", message).into());
        self.camera
            .send_message(message)
            .map_err(|e| TransportError::Send(describe(&e)))
    }

    fn terminate(&mut self) {
        if let Err(e) = self.camera.terminate() {
            web_sys::console::warn_1(&format!("Terminate failed: {}", describe(&e)).into());
        }
        self.detach_callbacks();
    }
}

/// Options object for the `PiCamera` constructor. The signaling host is
/// the page's own hostname.
fn client_options(config: &StreamConfig) -> Result<Object, TransportError> {
    let hostname = web_sys::window()
        .ok_or_else(|| TransportError::Unavailable("no window".to_string()))?
        .location()
        .hostname()
        .map_err(|e| TransportError::Unavailable(describe(&e)))?;

    let options = Object::new();
    let fields: [(&str, JsValue); 6] = [
        ("deviceUid", config.device_uid.as_str().into()),
        ("mqttHost", hostname.into()),
        ("mqttPath", config.signaling_path.as_str().into()),
        ("mqttPort", config.signaling_port.into()),
        ("ipcMode", config.ipc_mode.as_str().into()),
        ("datachannelOnly", config.datachannel_only.into()),
    ];
    for (key, value) in fields {
        Reflect::set(&options, &key.into(), &value)
            .map_err(|e| TransportError::Unavailable(describe(&e)))?;
    }
    Ok(options)
}

fn attach_callbacks(camera: &PiCamera, epoch: Epoch, sink: EventSink) -> Vec<Callback> {
    let on_stream = {
        let sink = Rc::clone(&sink);
        Closure::wrap(Box::new(move |stream: JsValue| {
            match stream.dyn_into::<MediaStream>() {
                Ok(stream) => {
                    web_sys::console::log_1(&"Video stream received".into());
                    if attach_stream(Some(&stream)) {
                        sink(epoch, TransportEvent::StreamArrived);
                    }
                }
                Err(_) => {
                    web_sys::console::log_1(&"Video stream stopped".into());
                    sink(epoch, TransportEvent::StreamStopped);
                }
            }
        }) as Box<dyn FnMut(JsValue)>)
    };
    camera.set_on_stream(on_stream.as_ref().unchecked_ref());

    let on_timeout = {
        let sink = Rc::clone(&sink);
        Closure::wrap(Box::new(move |_: JsValue| {
            web_sys::console::log_1(&"Connection attempt timed out".into());
            sink(epoch, TransportEvent::TimedOut);
        }) as Box<dyn FnMut(JsValue)>)
    };
    camera.set_on_timeout(on_timeout.as_ref().unchecked_ref());

    let on_connection_state = {
        let sink = Rc::clone(&sink);
        Closure::wrap(Box::new(move |state: JsValue| {
            let state = state.as_string().unwrap_or_default();
            web_sys::console::log_1(&format!("Connection state changed to {}", state).into());
            if let Some(state) = PeerState::parse(&state) {
                sink(epoch, TransportEvent::ConnectionState(state));
            }
        }) as Box<dyn FnMut(JsValue)>)
    };
    camera.set_on_connection_state(on_connection_state.as_ref().unchecked_ref());

    let on_datachannel = {
        let sink = Rc::clone(&sink);
        Closure::wrap(Box::new(move |id: JsValue| {
            let reliable = reliable_channel_id().map_or(false, |reliable| id == reliable);
            if reliable {
                web_sys::console::log_1(&"DataChannel is open".into());
            }
            sink(epoch, TransportEvent::DataChannelOpened { reliable });
        }) as Box<dyn FnMut(JsValue)>)
    };
    camera.set_on_datachannel(on_datachannel.as_ref().unchecked_ref());

    let on_message = Closure::wrap(Box::new(move |message: JsValue| {
        if let Some(text) = message.as_string() {
            sink(epoch, TransportEvent::Message(text));
        }
    }) as Box<dyn FnMut(JsValue)>);
    camera.set_on_message(on_message.as_ref().unchecked_ref());

    vec![
        on_stream,
        on_timeout,
        on_connection_state,
        on_datachannel,
        on_message,
    ]
}

/// `ChannelId.Reliable` from the loaded library
fn reliable_channel_id() -> Option<JsValue> {
    let ids = Reflect::get(&js_sys::global(), &"ChannelId".into()).ok()?;
    if ids.is_undefined() {
        return None;
    }
    Reflect::get(&ids, &"Reliable".into()).ok()
}

/// Point the page's video element at `stream`. Returns `false` when the
/// element is not mounted.
pub fn attach_stream(stream: Option<&MediaStream>) -> bool {
    let video = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(VIDEO_ELEMENT_ID))
        .and_then(|element| element.dyn_into::<HtmlVideoElement>().ok());

    match video {
        Some(video) => {
            video.set_src_object(stream);
            true
        }
        None => false,
    }
}

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn install_fake_client() {
        js_sys::eval(
            "globalThis.PiCamera = class {
                constructor(options) { this.options = options; this.terminated = 0; }
                connect() {}
                sendMessage(message) { this.sent = message; }
                terminate() { this.terminated += 1; }
            };",
        )
        .unwrap();
    }

    fn handler(camera: &PiCamera, name: &str) -> Function {
        Reflect::get(camera, &name.into()).unwrap().unchecked_into()
    }

    fn recording_sink() -> (EventSink, Rc<RefCell<Vec<(Epoch, TransportEvent)>>>) {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink: EventSink = {
            let events = Rc::clone(&events);
            Rc::new(move |epoch, event| events.borrow_mut().push((epoch, event)))
        };
        (sink, events)
    }

    #[wasm_bindgen_test]
    fn test_options_use_page_hostname() {
        install_fake_client();
        let (sink, _) = recording_sink();
        let transport = PiCameraTransport::new(&StreamConfig::default(), 1, sink).unwrap();

        let options = Reflect::get(&transport.camera, &"options".into()).unwrap();
        let get = |key: &str| Reflect::get(&options, &key.into()).unwrap();
        let hostname = web_sys::window().unwrap().location().hostname().unwrap();
        assert_eq!(get("mqttHost").as_string(), Some(hostname));
        assert_eq!(get("deviceUid").as_string().as_deref(), Some("Mekk"));
        assert_eq!(get("mqttPort").as_f64(), Some(8443.0));
        assert_eq!(get("ipcMode").as_string().as_deref(), Some("reliable"));
    }

    #[wasm_bindgen_test]
    fn test_terminate_releases_callbacks() {
        install_fake_client();
        let (sink, events) = recording_sink();
        let mut transport = PiCameraTransport::new(&StreamConfig::default(), 7, sink).unwrap();
        assert_eq!(transport.callbacks.len(), 5);

        handler(&transport.camera, "onTimeout")
            .call0(&JsValue::NULL)
            .unwrap();
        assert_eq!(events.borrow().as_slice(), &[(7, TransportEvent::TimedOut)]);

        transport.terminate();
        assert!(transport.callbacks.is_empty());
        let terminated = Reflect::get(&transport.camera, &"terminated".into()).unwrap();
        assert_eq!(terminated.as_f64(), Some(1.0));

        // Late library callbacks reach the no-op handlers
        handler(&transport.camera, "onMessage")
            .call1(&JsValue::NULL, &"{}".into())
            .unwrap();
        assert_eq!(events.borrow().len(), 1);
    }
}
