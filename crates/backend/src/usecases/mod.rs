pub mod u501_sync_pos_inventory;
