//! Контракты системы: доменные агрегаты, DTO дашбордов и usecase-контракты.
//!
//! Крейт не содержит логики доступа к данным — только типы, разделяемые
//! между backend и его потребителями.

pub mod dashboards;
pub mod domain;
pub mod enums;
pub mod usecases;
