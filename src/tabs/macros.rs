macro_rules! impl_tab_new {
    ($tab_name:ident, $resource:ty) => {
        impl $tab_name {
            pub fn new(inner: $crate::view_model::ListViewModelClient<$resource>) -> Self {
                Self { inner }
            }
        }
    };
}

macro_rules! impl_tab_methods {
    ($tab_name:ident, $resource:ty, $noun:ident) => {
        paste::paste! {
            #[allow(dead_code)]
            impl $tab_name {
                /// Last snapshot published by the view model.
                pub fn snapshot(&self) -> $crate::view_model::ListSnapshot<$resource> {
                    self.inner.snapshot()
                }

                /// Observer that wakes on every published snapshot.
                pub fn subscribe(&self) -> tokio::sync::watch::Receiver<$crate::view_model::ListSnapshot<$resource>> {
                    self.inner.subscribe()
                }

                /// Waits until no fetch, write or search window is outstanding.
                pub async fn settled(&self) -> Result<$crate::view_model::ListSnapshot<$resource>, $crate::error::ViewModelError> {
                    self.inner.settled().await
                }

                #[tracing::instrument(skip(self))]
                pub async fn [<refresh_ $noun>](&self) -> Result<(), $crate::error::ViewModelError> {
                    tracing::debug!("Sending request");
                    self.inner.refresh().await
                }

                pub fn [<visible_ $noun>](&self) -> Vec<$resource> {
                    self.inner.snapshot().visible
                }
            }
        }
    };
}

macro_rules! impl_basic_tab {
    ($tab_name:ident, $resource:ty, $noun:ident) => {
        impl_tab_new!($tab_name, $resource);
        impl_tab_methods!($tab_name, $resource, $noun);
    };
}
