// ==========================================
// 药品目录提取工具 - 记录映射器
// ==========================================
// 职责: 一行原始数据 → 一条 ProductRecord
// 流程: 字段映射 → 空行判定 → 价格推算 → 查找解析 → 条码 → 翻译 → 组装
// 红线: 查找失败不终止该行，使用默认 ID 并记录回退告警
// ==========================================

use crate::config::extract_defaults::{
    DEFAULT_CATEGORY_ID, DEFAULT_LOOKUP_ID, DEFAULT_TYPE_ID, TAX_RATE, TRANSLATION_LANG,
};
use crate::domain::{LookupFallback, LookupKind, MappedRecord, ProductRecord, ProductTranslation};
use crate::i18n::bilingual_with_args;
use crate::importer::derivation::{build_notes, derive_purchase_price, RandomBarcodeGenerator};
use crate::importer::error::ImportResult;
use crate::importer::field_mapper::FieldMapper;
use crate::importer::product_importer_trait::{BarcodeGenerator, RawRow};
use crate::importer::translation::TranslationTable;
use crate::repository::LookupResolver;
use tracing::warn;

pub struct RecordMapper {
    field_mapper: FieldMapper,
    translations: TranslationTable,
    barcodes: Box<dyn BarcodeGenerator>,
}

impl RecordMapper {
    pub fn new(translations: TranslationTable, barcodes: Box<dyn BarcodeGenerator>) -> Self {
        Self {
            field_mapper: FieldMapper::default(),
            translations,
            barcodes,
        }
    }

    /// 内置翻译表 + 随机条码
    pub fn with_defaults() -> Self {
        Self::new(
            TranslationTable::builtin(),
            Box::new(RandomBarcodeGenerator::default()),
        )
    }

    /// 映射单行
    ///
    /// # 参数
    /// - row: 原始行
    /// - row_number: 数据行号（从 1 开始）
    /// - resolver: 剂型/厂家名称解析器
    ///
    /// # 返回
    /// - Ok(None): 商品名与成分均为空，跳过
    /// - Ok(Some(MappedRecord)): 映射结果（可能带回退告警）
    /// - Err: 行级错误（价格非数字等）
    pub async fn map_row<R>(
        &self,
        row: &RawRow,
        row_number: usize,
        resolver: &mut R,
    ) -> ImportResult<Option<MappedRecord>>
    where
        R: LookupResolver + ?Sized,
    {
        let raw = self.field_mapper.map_to_raw_product(row, row_number)?;
        if raw.is_blank() {
            return Ok(None);
        }

        // 价格: 缺失销售价按 0 处理；缺失采购价由销售价推算
        let selling = raw.selling_price.unwrap_or(0.0);
        let purchase = raw
            .purchase_price
            .unwrap_or_else(|| derive_purchase_price(selling));

        let mut fallbacks = Vec::new();
        let form_id = self
            .resolve_or_default(resolver, LookupKind::Form, &raw.form, &mut fallbacks)
            .await;
        let manufacturer_id = self
            .resolve_or_default(
                resolver,
                LookupKind::Manufacturer,
                &raw.manufacturer,
                &mut fallbacks,
            )
            .await;

        let translation = ProductTranslation {
            trade_name: self.translations.translate(&raw.trade_name),
            scientific_name: self.translations.translate(&raw.scientific_name),
            lang: TRANSLATION_LANG.to_string(),
        };

        let record = ProductRecord {
            notes: build_notes(&raw.manufacturer, &raw.form),
            trade_name: raw.trade_name,
            scientific_name: raw.scientific_name,
            concentration: raw.concentration,
            size: raw.size,
            ref_purchase_price: purchase,
            ref_selling_price: selling,
            tax: TAX_RATE,
            barcode: self.barcodes.generate(),
            requires_prescription: false,
            type_id: DEFAULT_TYPE_ID,
            form_id,
            manufacturer_id,
            category_ids: vec![DEFAULT_CATEGORY_ID],
            translations: vec![translation],
        };

        Ok(Some(MappedRecord { record, fallbacks }))
    }

    async fn resolve_or_default<R>(
        &self,
        resolver: &mut R,
        kind: LookupKind,
        name: &str,
        fallbacks: &mut Vec<LookupFallback>,
    ) -> i64
    where
        R: LookupResolver + ?Sized,
    {
        let outcome = resolver.resolve(kind, name).await;
        if let Some(id) = outcome.id() {
            return id;
        }

        let reason = outcome.fallback_reason().unwrap_or_default();
        warn!(
            kind = %kind,
            reason = %reason,
            "{}",
            bilingual_with_args(fallback_key(kind), &[("name", name)])
        );
        fallbacks.push(LookupFallback {
            kind,
            name: name.to_string(),
            reason,
            fallback_id: DEFAULT_LOOKUP_ID,
        });
        DEFAULT_LOOKUP_ID
    }
}

fn fallback_key(kind: LookupKind) -> &'static str {
    match kind {
        LookupKind::Form => "lookup.fallback_form",
        LookupKind::Manufacturer => "lookup.fallback_manufacturer",
    }
}
