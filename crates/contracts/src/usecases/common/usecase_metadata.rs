/// Метаданные usecase для реестра и UI
pub trait UseCaseMetadata {
    /// Индекс usecase в системе (например, "u501")
    fn usecase_index() -> &'static str;

    /// Системное имя usecase
    fn usecase_name() -> &'static str;

    /// Человекочитаемое название
    fn display_name() -> &'static str;

    /// Краткое описание
    fn description() -> &'static str;
}
