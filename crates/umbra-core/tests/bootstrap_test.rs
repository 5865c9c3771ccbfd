// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::cell::RefCell;
use std::rc::Rc;

use umbra_core::config::WindowConfig;
use umbra_core::render::{BlendMode, Frame, RenderError, Renderer};
use umbra_core::{BootstrapError, GameContext, Platform};

// --- A SCRIPTED PLATFORM THAT RECORDS EVERY CALL AND RELEASE ---

type Journal = Rc<RefCell<Vec<String>>>;

/// Records its own release in the shared journal.
struct Tracked {
    name: &'static str,
    journal: Journal,
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.journal.borrow_mut().push(format!("release {}", self.name));
    }
}

struct FakeRenderer {
    _tracked: Tracked,
    blend_mode: BlendMode,
}

impl Renderer for FakeRenderer {
    fn set_blend_mode(&mut self, mode: BlendMode) {
        self.blend_mode = mode;
    }

    fn blend_mode(&self) -> BlendMode {
        self.blend_mode
    }

    fn resize(&mut self, _width: u32, _height: u32) {}

    fn present(&mut self, _frame: &Frame) -> Result<(), RenderError> {
        Ok(())
    }
}

#[derive(Clone, Copy, PartialEq)]
enum FailAt {
    Nothing,
    Subsystem,
    Window,
    Renderer,
}

struct FakePlatform {
    fail_at: FailAt,
    journal: Journal,
}

impl FakePlatform {
    fn new(fail_at: FailAt) -> Self {
        Self {
            fail_at,
            journal: Rc::new(RefCell::new(Vec::new())),
        }
    }

    fn track(&self, name: &'static str) -> Tracked {
        Tracked {
            name,
            journal: self.journal.clone(),
        }
    }

    fn log(&self, entry: &str) {
        self.journal.borrow_mut().push(entry.to_string());
    }

    fn entries(&self) -> Vec<String> {
        self.journal.borrow().clone()
    }
}

impl Platform for FakePlatform {
    type Subsystem = Tracked;
    type Window = Tracked;
    type Renderer = FakeRenderer;
    type Error = String;

    fn init_subsystem(&mut self) -> Result<Tracked, String> {
        self.log("init subsystem");
        if self.fail_at == FailAt::Subsystem {
            return Err("no display".to_string());
        }
        Ok(self.track("subsystem"))
    }

    fn create_window(&mut self, _: &Tracked, config: &WindowConfig) -> Result<Tracked, String> {
        self.log(&format!("create window {}x{}", config.width, config.height));
        if self.fail_at == FailAt::Window {
            return Err("window refused".to_string());
        }
        Ok(self.track("window"))
    }

    fn create_renderer(&mut self, _: &Tracked, _: &Tracked) -> Result<FakeRenderer, String> {
        self.log("create renderer");
        if self.fail_at == FailAt::Renderer {
            return Err("no adapter".to_string());
        }
        Ok(FakeRenderer {
            _tracked: self.track("renderer"),
            blend_mode: BlendMode::None,
        })
    }
}

type FakeContext = GameContext<Tracked, Tracked, FakeRenderer>;

fn bootstrap(fail_at: FailAt) -> (FakeContext, FakePlatform, Result<(), BootstrapError>) {
    let mut platform = FakePlatform::new(fail_at);
    let mut context = FakeContext::new();
    let result = context.initialize(&mut platform, &WindowConfig::default());
    (context, platform, result)
}

// --- PROPERTIES ---

#[test]
fn test_new_context_is_not_running() {
    let context = FakeContext::new();
    assert!(!context.is_running());
    assert!(!context.is_initialized());
}

#[test]
fn test_subsystem_failure_attempts_nothing_else() {
    let (context, platform, result) = bootstrap(FailAt::Subsystem);

    assert!(matches!(result, Err(BootstrapError::Subsystem(ref d)) if d == "no display"));
    assert!(!context.is_running());
    assert_eq!(platform.entries(), vec!["init subsystem"]);
}

#[test]
fn test_window_failure_releases_subsystem() {
    let (context, platform, result) = bootstrap(FailAt::Window);

    assert!(matches!(result, Err(BootstrapError::Window(_))));
    assert!(!context.is_running());
    assert!(!context.is_initialized());
    assert_eq!(
        platform.entries(),
        vec!["init subsystem", "create window 900x660", "release subsystem"]
    );
}

#[test]
fn test_renderer_failure_releases_in_reverse_order() {
    let (context, platform, result) = bootstrap(FailAt::Renderer);

    assert!(matches!(result, Err(BootstrapError::Renderer(_))));
    assert!(!context.is_running());
    assert!(context.window().is_none());
    assert_eq!(
        platform.entries(),
        vec![
            "init subsystem",
            "create window 900x660",
            "create renderer",
            "release window",
            "release subsystem",
        ]
    );
}

#[test]
fn test_success_sets_running_and_blend_mode() {
    let (mut context, platform, result) = bootstrap(FailAt::Nothing);

    assert!(result.is_ok());
    assert!(context.is_running());
    assert!(context.window().is_some());
    let renderer = context.renderer_mut().expect("renderer must exist");
    assert_eq!(renderer.blend_mode(), BlendMode::Blend);
    assert!(context.window_and_renderer_mut().is_some());
    assert!(!platform.entries().iter().any(|e| e.starts_with("release")));
}

#[test]
fn test_teardown_after_success_releases_everything_once() {
    let (mut context, platform, _) = bootstrap(FailAt::Nothing);

    context.teardown();
    context.teardown();
    drop(context);

    let releases: Vec<String> = platform
        .entries()
        .into_iter()
        .filter(|e| e.starts_with("release"))
        .collect();
    assert_eq!(
        releases,
        vec!["release renderer", "release window", "release subsystem"]
    );
}

#[test]
fn test_teardown_after_partial_failure_is_harmless() {
    let (mut context, platform, _) = bootstrap(FailAt::Renderer);
    let before = platform.entries().len();

    context.teardown();
    assert!(!context.is_running());
    drop(context);

    assert_eq!(platform.entries().len(), before);
}

#[test]
fn test_drop_releases_without_explicit_teardown() {
    let (context, platform, _) = bootstrap(FailAt::Nothing);
    drop(context);
    assert_eq!(
        platform.entries().last().map(String::as_str),
        Some("release subsystem")
    );
}

#[test]
fn test_second_initialize_is_rejected() {
    let (mut context, mut platform, _) = bootstrap(FailAt::Nothing);
    let result = context.initialize(&mut platform, &WindowConfig::default());
    assert_eq!(result, Err(BootstrapError::AlreadyInitialized));
    assert!(context.is_running());
}

#[test]
fn test_retry_after_failure_is_allowed() {
    let (mut context, mut platform, _) = bootstrap(FailAt::Window);
    platform.fail_at = FailAt::Nothing;
    assert!(context
        .initialize(&mut platform, &WindowConfig::default())
        .is_ok());
    assert!(context.is_running());
}

#[test]
fn test_stop_keeps_resources_until_teardown() {
    let (mut context, platform, _) = bootstrap(FailAt::Nothing);
    context.stop();
    assert!(!context.is_running());
    assert!(context.is_initialized());
    assert!(!platform.entries().iter().any(|e| e.starts_with("release")));
}
