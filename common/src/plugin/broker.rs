use tokio::{
    runtime::{Builder, Runtime},
    sync::{Mutex, RwLock},
};

use crate::{args::ElementArgs, filter::PayloadBroker};

use super::base::{BasePlugin, FilterSubclass};

pub type DynBroker = Box<dyn PayloadBroker>;

/// Element state of a broker, whose file writers run on an owned runtime.
pub struct BrokerPlugin<Args> {
    base: BasePlugin<Args, DynBroker>,
    runtime: Runtime,
}

impl<Args> Default for BrokerPlugin<Args>
where
    Args: Default,
{
    fn default() -> Self {
        let runtime = Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .expect("Tokio runtime should be created");

        Self {
            base: BasePlugin::default(),
            runtime,
        }
    }
}

pub trait RuntimeSubclass {
    fn runtime(&self) -> &Runtime;
}

impl<Args> RuntimeSubclass for BrokerPlugin<Args> {
    #[inline]
    fn runtime(&self) -> &Runtime {
        &self.runtime
    }
}

impl<Args> FilterSubclass for BrokerPlugin<Args>
where
    Args: ElementArgs,
{
    type Args = Args;
    type Filter = DynBroker;

    #[inline]
    fn args(&self) -> &RwLock<Self::Args> {
        self.base.args()
    }

    #[inline]
    fn filter(&self) -> &Mutex<Option<Self::Filter>> {
        self.base.filter()
    }
}
