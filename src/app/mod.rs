// src/app/mod.rs
//! テーブル全体を動かすロジックと、JavaScript 向けの入口を置くモジュールだよ！

pub mod layout_app;
pub mod table_view;
