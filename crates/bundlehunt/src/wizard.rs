//! 対話式のパッケージ選択
//!
//! 在庫ありのパッケージを先頭に、残りをその後ろに通し番号で並べる。
//! 0 はキャンセル。入力のやり直しは [`MAX_ATTEMPTS`] 回まで。

use crate::display;
use bundlehunt_cloud::BundleInfo;
use colored::Colorize;
use std::io::{self, BufRead, Write};
use thiserror::Error;

pub const MAX_ATTEMPTS: usize = 10;

#[derive(Error, Debug)]
pub enum WizardError {
    #[error("対話入力が利用できません (標準入力が閉じています)")]
    InputUnavailable,

    #[error("有効な入力が{0}回得られませんでした")]
    TooManyAttempts(usize),

    #[error("選択できるパッケージがありません")]
    NoBundles,

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    Bundle(BundleInfo),
    Cancelled,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WizardOutcome {
    Cancelled,
    Chosen {
        bundle: BundleInfo,
        saved: bool,
        /// すぐに監視を始めるか
        start: bool,
    },
}

/// 在庫ありを先頭にした表示順
pub struct Partitioned<'a> {
    pub available: Vec<&'a BundleInfo>,
    pub others: Vec<&'a BundleInfo>,
}

impl<'a> Partitioned<'a> {
    pub fn new(bundles: &'a [BundleInfo]) -> Self {
        let (available, others) = bundles.iter().partition(|b| b.is_available());
        Self { available, others }
    }

    pub fn len(&self) -> usize {
        self.available.len() + self.others.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 1 始まりの番号で取得
    pub fn get(&self, number: usize) -> Option<&'a BundleInfo> {
        if number == 0 {
            return None;
        }
        let index = number - 1;
        if index < self.available.len() {
            Some(self.available[index])
        } else {
            self.others.get(index - self.available.len()).copied()
        }
    }
}

pub struct Prompter<R, W> {
    input: R,
    output: W,
    max_attempts: usize,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            max_attempts: MAX_ATTEMPTS,
        }
    }

    fn ask(&mut self, question: &str) -> Result<String, WizardError> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(WizardError::InputUnavailable);
        }
        Ok(line.trim().to_string())
    }

    /// `0..=max` の整数を読む
    pub fn ask_number(&mut self, question: &str, max: usize) -> Result<usize, WizardError> {
        for _ in 0..self.max_attempts {
            let answer = self.ask(question)?;
            match answer.parse::<usize>() {
                Ok(n) if n <= max => return Ok(n),
                _ => writeln!(
                    self.output,
                    "{}",
                    format!("✗ 0-{} の数字を入力してください", max).red()
                )?,
            }
        }
        Err(WizardError::TooManyAttempts(self.max_attempts))
    }

    /// y/yes/n/no を読む。空入力は `default`
    pub fn ask_yes_no(&mut self, question: &str, default: bool) -> Result<bool, WizardError> {
        for _ in 0..self.max_attempts {
            let answer = self.ask(question)?.to_lowercase();
            match answer.as_str() {
                "" => return Ok(default),
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => writeln!(
                    self.output,
                    "{}",
                    "✗ y/yes または n/no で答えてください".red()
                )?,
            }
        }
        Err(WizardError::TooManyAttempts(self.max_attempts))
    }

    pub fn select_bundle(&mut self, bundles: &[BundleInfo]) -> Result<Selection, WizardError> {
        let partitioned = Partitioned::new(bundles);
        if partitioned.is_empty() {
            return Err(WizardError::NoBundles);
        }

        writeln!(self.output, "\n{}", "📋 パッケージ一覧:".bold())?;
        writeln!(
            self.output,
            "{}",
            display::bundle_list(&partitioned.available, &partitioned.others, true)
        )?;

        let question = format!(
            "パッケージを選択してください (1-{}, 0 で終了): ",
            partitioned.len()
        );
        let number = self.ask_number(&question, partitioned.len())?;

        match partitioned.get(number) {
            None => Ok(Selection::Cancelled),
            Some(bundle) => {
                writeln!(
                    self.output,
                    "\n{} {} - {} - 価格: {}",
                    "✓ 選択:".green().bold(),
                    bundle.id.cyan(),
                    bundle.title(),
                    display::format_price(bundle.price.as_ref())
                )?;
                Ok(Selection::Bundle(bundle.clone()))
            }
        }
    }

    pub fn confirm_save(&mut self, bundle_id: &str) -> Result<bool, WizardError> {
        self.ask_yes_no(
            &format!("パッケージ {} を設定ファイルに保存しますか？ (y/N): ", bundle_id),
            false,
        )
    }

    pub fn confirm_start(&mut self) -> Result<bool, WizardError> {
        self.ask_yes_no("このパッケージの在庫監視を今すぐ開始しますか？ (Y/n): ", true)
    }

    /// 選択 → 保存確認 → 開始確認
    ///
    /// `persist` は保存に同意した場合のみ、開始確認の前に呼ばれる。
    /// `ask_start` が false なら開始確認を省略し `start: false` を返す。
    pub fn run<F>(
        &mut self,
        bundles: &[BundleInfo],
        ask_start: bool,
        persist: F,
    ) -> anyhow::Result<WizardOutcome>
    where
        F: FnOnce(&str) -> anyhow::Result<()>,
    {
        let bundle = match self.select_bundle(bundles)? {
            Selection::Cancelled => return Ok(WizardOutcome::Cancelled),
            Selection::Bundle(bundle) => bundle,
        };

        let saved = self.confirm_save(&bundle.id)?;
        if saved {
            persist(&bundle.id)?;
            writeln!(
                self.output,
                "{}",
                format!("✓ {} を設定ファイルに保存しました", bundle.id).green()
            )?;
        }

        let start = ask_start && self.confirm_start()?;
        Ok(WizardOutcome::Chosen {
            bundle,
            saved,
            start,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bundlehunt_cloud::SaleState;
    use std::io::Cursor;

    fn bundles(available: usize, sold_out: usize) -> Vec<BundleInfo> {
        // 在庫あり/なしを交互に混ぜる
        let mut out = Vec::new();
        let (mut a, mut s) = (0, 0);
        while a < available || s < sold_out {
            if s < sold_out {
                out.push(BundleInfo::new(format!("sold_{}", s), SaleState::SoldOut));
                s += 1;
            }
            if a < available {
                out.push(BundleInfo::new(format!("open_{}", a), SaleState::Available));
                a += 1;
            }
        }
        out
    }

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output(p: &Prompter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8_lossy(&p.output).to_string()
    }

    #[test]
    fn test_partition_preserves_relative_order() {
        let list = bundles(2, 2);
        let partitioned = Partitioned::new(&list);

        let ids: Vec<&str> = (1..=4)
            .map(|n| partitioned.get(n).unwrap().id.as_str())
            .collect();
        assert_eq!(ids, vec!["open_0", "open_1", "sold_0", "sold_1"]);
        assert!(partitioned.get(0).is_none());
        assert!(partitioned.get(5).is_none());
    }

    #[test]
    fn test_number_nine_picks_first_unavailable() {
        let list = bundles(8, 3);
        let mut p = prompter("9\n");

        let selection = p.select_bundle(&list).unwrap();
        match selection {
            Selection::Bundle(bundle) => assert_eq!(bundle.id, "sold_0"),
            other => panic!("unexpected selection: {other:?}"),
        }
    }

    #[test]
    fn test_zero_cancels() {
        let mut p = prompter("0\n");
        assert_eq!(
            p.select_bundle(&bundles(1, 1)).unwrap(),
            Selection::Cancelled
        );
    }

    #[test]
    fn test_invalid_input_reprompts() {
        let mut p = prompter("abc\n-1\n7\n 2 \n");
        let selection = p.select_bundle(&bundles(1, 1)).unwrap();

        assert_eq!(selection, Selection::Bundle(bundles(1, 1)[0].clone()));
        assert_eq!(output(&p).matches("0-2 の数字を入力してください").count(), 3);
    }

    #[test]
    fn test_reprompt_is_bounded() {
        let input = "x\n".repeat(MAX_ATTEMPTS);
        let mut p = prompter(&input);

        let err = p.select_bundle(&bundles(1, 0)).unwrap_err();
        assert!(matches!(err, WizardError::TooManyAttempts(MAX_ATTEMPTS)));
    }

    #[test]
    fn test_eof_means_input_unavailable() {
        let mut p = prompter("");
        let err = p.select_bundle(&bundles(1, 0)).unwrap_err();
        assert!(matches!(err, WizardError::InputUnavailable));
    }

    #[test]
    fn test_empty_list_is_an_error() {
        let mut p = prompter("1\n");
        assert!(matches!(
            p.select_bundle(&[]),
            Err(WizardError::NoBundles)
        ));
    }

    #[test]
    fn test_yes_no_defaults_and_variants() {
        let mut p = prompter("\n\nYES\n n \nmaybe\ny\n");
        assert!(!p.ask_yes_no("? ", false).unwrap());
        assert!(p.ask_yes_no("? ", true).unwrap());
        assert!(p.ask_yes_no("? ", false).unwrap());
        assert!(!p.ask_yes_no("? ", true).unwrap());
        // "maybe" は再入力
        assert!(p.ask_yes_no("? ", false).unwrap());
    }

    #[test]
    fn test_run_saves_then_starts_by_default() {
        let list = bundles(2, 0);
        let mut p = prompter("2\ny\n\n");
        let mut persisted = None;

        let outcome = p
            .run(&list, true, |id| {
                persisted = Some(id.to_string());
                Ok(())
            })
            .unwrap();

        assert_eq!(persisted.as_deref(), Some("open_1"));
        assert_eq!(
            outcome,
            WizardOutcome::Chosen {
                bundle: list[1].clone(),
                saved: true,
                start: true,
            }
        );
    }

    #[test]
    fn test_run_save_defaults_to_no() {
        let list = bundles(1, 0);
        let mut p = prompter("1\n\nn\n");
        let mut called = false;

        let outcome = p
            .run(&list, true, |_| {
                called = true;
                Ok(())
            })
            .unwrap();

        assert!(!called);
        assert_eq!(
            outcome,
            WizardOutcome::Chosen {
                bundle: list[0].clone(),
                saved: false,
                start: false,
            }
        );
    }

    #[test]
    fn test_run_without_start_question() {
        let list = bundles(1, 0);
        // 開始確認を聞かないので入力は2行で足りる
        let mut p = prompter("1\ny\n");

        let outcome = p.run(&list, false, |_| Ok(())).unwrap();
        assert!(matches!(
            outcome,
            WizardOutcome::Chosen {
                saved: true,
                start: false,
                ..
            }
        ));
    }

    #[test]
    fn test_run_cancel_skips_questions() {
        let mut p = prompter("0\n");
        let outcome = p
            .run(&bundles(1, 0), true, |_| panic!("must not persist"))
            .unwrap();
        assert_eq!(outcome, WizardOutcome::Cancelled);
    }
}
