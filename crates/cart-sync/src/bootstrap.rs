//! Application Bootstrapper
//!
//! Picks the page modules for the current path from a static route table,
//! builds them from the shared [`AppContext`] and keeps them for the page
//! lifetime. Modules without a registered factory are skipped, and so is a
//! module whose construction or `init` fails; the rest still start.

use std::collections::HashMap;
use std::rc::Rc;

use log::{error, info, warn};

use crate::context::AppContext;
use crate::domain::{CartError, CartResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ModuleName {
    Cart,
    CartPanel,
    Sorting,
    Offers,
    Chat,
}

impl ModuleName {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleName::Cart => "cart",
            ModuleName::CartPanel => "cartPanel",
            ModuleName::Sorting => "sorting",
            ModuleName::Offers => "offers",
            ModuleName::Chat => "chat",
        }
    }
}

impl std::fmt::Display for ModuleName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Path fragment -> modules; a path loads every entry it contains.
pub const PAGE_MODULES: &[(&str, &[ModuleName])] = &[
    ("/carrito/", &[ModuleName::Cart]),
    ("/productos/", &[ModuleName::Cart, ModuleName::Sorting]),
    ("/soporte/", &[ModuleName::Chat]),
    ("/ofertas/", &[ModuleName::Cart, ModuleName::Offers]),
    ("/", &[ModuleName::Cart, ModuleName::CartPanel]),
    ("/producto/", &[ModuleName::Cart, ModuleName::CartPanel]),
];

/// Modules for a path, de-duplicated in table order.
pub fn modules_for_path(path: &str) -> Vec<ModuleName> {
    let mut modules = Vec::new();
    for (route, names) in PAGE_MODULES {
        if !path.contains(route) {
            continue;
        }
        for name in names.iter() {
            if !modules.contains(name) {
                modules.push(*name);
            }
        }
    }
    modules
}

/// A page feature that binds itself to the DOM once
pub trait Module {
    fn init(&self) -> CartResult<()>;
}

pub type ModuleFactory = Box<dyn Fn(&AppContext) -> CartResult<Rc<dyn Module>>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// No factory registered in this build
    Unavailable,
    Failed(CartError),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BootReport {
    pub loaded: Vec<ModuleName>,
    pub skipped: Vec<(ModuleName, SkipReason)>,
}

pub struct AppBootstrapper {
    ctx: AppContext,
    factories: HashMap<ModuleName, ModuleFactory>,
    modules: HashMap<ModuleName, Rc<dyn Module>>,
    booted: bool,
}

impl AppBootstrapper {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            factories: HashMap::new(),
            modules: HashMap::new(),
            booted: false,
        }
    }

    pub fn register(&mut self, name: ModuleName, factory: ModuleFactory) -> &mut Self {
        self.factories.insert(name, factory);
        self
    }

    /// Start the modules for `path`. Runs once; later calls return an
    /// empty report.
    pub fn boot(&mut self, path: &str) -> BootReport {
        let mut report = BootReport::default();
        if self.booted {
            warn!("[BOOT] Already booted, ignoring {}", path);
            return report;
        }
        self.booted = true;
        info!("[BOOT] Starting modules for {}", path);

        for name in modules_for_path(path) {
            let Some(factory) = self.factories.get(&name) else {
                warn!("[BOOT] Module {} not available", name);
                report.skipped.push((name, SkipReason::Unavailable));
                continue;
            };

            match factory(&self.ctx).and_then(|module| module.init().map(|_| module)) {
                Ok(module) => {
                    info!("[BOOT] Module {} loaded", name);
                    self.modules.insert(name, module);
                    report.loaded.push(name);
                }
                Err(e) => {
                    error!("[BOOT] Module {} failed: {}", name, e);
                    report.skipped.push((name, SkipReason::Failed(e)));
                }
            }
        }
        report
    }

    pub fn get(&self, name: ModuleName) -> Option<Rc<dyn Module>> {
        self.modules.get(&name).cloned()
    }

    pub fn has(&self, name: ModuleName) -> bool {
        self.modules.contains_key(&name)
    }
}
