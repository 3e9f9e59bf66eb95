// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! *Part of the Timeline Calendar project*
//!
//! This crate contains the Timeline Calendar procedural macros
//!

extern crate proc_macro;

use proc_macro::TokenStream;
use quote::quote;
use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::{Expr, ExprLit, ExprUnary, Lit, Token, UnOp, parse_macro_input};

// Must match timeline_calendar_core::{MIN_YEAR, MAX_YEAR}
const MIN_YEAR: i64 = -9999;
const MAX_YEAR: i64 = 9999;

// February never has a 29th in the fictional calendar
const MONTH_LENGTHS: [i64; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// An integer literal, optionally negated
fn parse_signed_integer(expr: &Expr) -> syn::Result<i64> {
    match expr {
        Expr::Lit(ExprLit {
            lit: Lit::Int(lit), ..
        }) => lit.base10_parse::<i64>(),
        Expr::Unary(ExprUnary {
            op: UnOp::Neg(_),
            expr,
            ..
        }) => parse_signed_integer(expr).map(|value| -value),
        Expr::Paren(paren) => parse_signed_integer(&paren.expr),
        Expr::Group(group) => parse_signed_integer(&group.expr),
        _ => Err(syn::Error::new_spanned(expr, "Expected an integer literal")),
    }
}

fn checked_value(expr: &Expr, type_name: &str, min: i64, max: i64) -> syn::Result<i64> {
    let value = parse_signed_integer(expr)?;
    if value < min || value > max {
        return Err(syn::Error::new_spanned(
            expr,
            format!("{type_name} must be between {min} and {max}"),
        ));
    }
    Ok(value)
}

/// Generate the type with compile time bounds checking
fn generate_const_checked_integer_macro(
    input: TokenStream,
    type_name: &str,
    min: i64,
    max: i64,
) -> TokenStream {
    let expr = parse_macro_input!(input as Expr);
    let value = match checked_value(&expr, type_name, min, max) {
        Ok(value) => value,
        Err(error) => return error.to_compile_error().into(),
    };

    let ident = syn::Ident::new(type_name, proc_macro2::Span::call_site());
    quote! {
        #ident::try_from(#value).unwrap()
    }
    .into()
}

/// Create a `Day`, using `day!(x)`, with compile time checking of the value.
#[proc_macro]
pub fn day(input: TokenStream) -> TokenStream {
    generate_const_checked_integer_macro(input, "Day", 1, 31)
}

/// Create a `Month`, using `month!(x)`, with compile time checking of the value.
#[proc_macro]
pub fn month(input: TokenStream) -> TokenStream {
    generate_const_checked_integer_macro(input, "Month", 1, 12)
}

/// Create a `Year`, using `year!(x)`, with compile time checking of the value.
/// Negative years are written as usual, e.g. `year!(-2)`.
#[proc_macro]
pub fn year(input: TokenStream) -> TokenStream {
    generate_const_checked_integer_macro(input, "Year", MIN_YEAR, MAX_YEAR)
}

struct DateArgs {
    year: Expr,
    month: Expr,
    day: Expr,
}

impl Parse for DateArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let args = Punctuated::<Expr, Token![,]>::parse_terminated(input)?;
        if args.len() != 3 {
            return Err(input.error("Expected `year, month, day`"));
        }
        let mut args = args.into_iter();
        match (args.next(), args.next(), args.next()) {
            (Some(year), Some(month), Some(day)) => Ok(DateArgs { year, month, day }),
            _ => Err(input.error("Expected `year, month, day`")),
        }
    }
}

/// Create a `FictionalDate`, using `fictional_date!(year, month, day)`, with
/// compile time checking that the day exists in the month.
#[proc_macro]
pub fn fictional_date(input: TokenStream) -> TokenStream {
    let args = parse_macro_input!(input as DateArgs);

    let checked = checked_value(&args.year, "Year", MIN_YEAR, MAX_YEAR).and_then(|year| {
        let month = checked_value(&args.month, "Month", 1, 12)?;
        let last_day = MONTH_LENGTHS[(month - 1) as usize];
        let day = checked_value(&args.day, "Day", 1, last_day)?;
        Ok((year, month, day))
    });
    let (year, month, day) = match checked {
        Ok(values) => values,
        Err(error) => return error.to_compile_error().into(),
    };

    quote! {
        FictionalDate::from_values(#year, #month, #day).unwrap()
    }
    .into()
}
