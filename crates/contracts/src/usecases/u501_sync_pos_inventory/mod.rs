pub mod progress;
pub mod request;
pub mod response;

pub use progress::SyncProgress;
pub use request::SyncRequest;
pub use response::SyncResponse;

use crate::usecases::common::UseCaseMetadata;

pub struct SyncPosInventory;

impl UseCaseMetadata for SyncPosInventory {
    fn usecase_index() -> &'static str {
        "u501"
    }

    fn usecase_name() -> &'static str {
        "sync_pos_inventory"
    }

    fn display_name() -> &'static str {
        "Синхронизация меню из POS"
    }

    fn description() -> &'static str {
        "Загрузка каталога блюд из внешней POS и обновление локального меню по external_id"
    }
}
