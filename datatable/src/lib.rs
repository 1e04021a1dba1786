pub mod autoscroll;
pub mod config;
pub mod error;
pub mod layout;
pub mod pagination;
pub mod props;
pub mod scroll;
pub mod selection;
pub mod shadow;
pub mod table;
pub mod testing;
pub mod widgets;

pub use config::TableConfig;
pub use error::PreferenceError;
pub use props::TableProps;
pub use table::{DataTable, TableEnvironment, TableId};

pub mod prelude {
    pub use crate::config::{AutoScrollConfig, PageSizeConfig, ShadowConfig, TableConfig};
    pub use crate::error::PreferenceError;
    pub use crate::layout::{ContainerRef, ContainerRegistry, Document, ScrollContainer, StickyStyle};
    pub use crate::pagination::{
        FileStore, MemoryStore, PageInfo, PageSizePreference, Pagination, PreferenceStore,
    };
    pub use crate::props::{SelectTrigger, TableProps};
    pub use crate::scroll::ScrollState;
    pub use crate::selection::SelectionState;
    pub use crate::shadow::ShadowFallback;
    pub use crate::table::{DataTable, TableEnvironment, TableId};
    pub use crate::widgets::{ActionSource, ActionVariant, Alignment, BulkAction, Column, Length, TableAction};

    pub use tabledom::{Element, Key, LayoutEvent};
}
