//! Core library for the enrolment-checker command line application.
//!
//! The library reconciles enrolment records exported from the learning
//! platform and the student database. Row sources and the workbook writer live
//! under [`enrolment::checker::io`], record types in
//! [`enrolment::checker::model`], field checks in
//! [`enrolment::checker::validate`], normalisation in
//! [`enrolment::checker::clean`] and [`enrolment::checker::dates`], the join
//! and date comparison in [`enrolment::checker::reconcile`], and the end to end
//! runs under [`enrolment::checker::process`].

pub mod enrolment;

pub use enrolment::checker::{
    CheckerError, Result, clean, dates, error, io, model, process, reconcile, sink, validate,
};
