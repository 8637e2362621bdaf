#[cfg(test)]
mod test {
    use crate::navigation::{BroadcastOrbit, NavDecoder};
    use crate::prelude::*;
    use crate::tests::{init_logger, test_resource};
    use std::str::FromStr;

    #[test]
    fn v2_brdc1690() {
        init_logger();
        let mut decoder = NavDecoder::from_file(test_resource("NAV/V2/brdc1690.20n")).unwrap();

        let header = decoder.header();
        assert_eq!(header.version, Version::new(2, 11));
        assert_eq!(header.constellation, Some(SatelliteSystem::GPS));
        assert_eq!(header.leap.as_ref().unwrap().leap, 18);

        let nav = header.nav.as_ref().unwrap();
        assert_eq!(nav.ionospheric_corrections.len(), 2);
        assert_eq!(nav.ionospheric_corrections[0].kind, "GPSA");
        assert_eq!(nav.ionospheric_corrections[1].kind, "GPSB");
        assert_eq!(nav.ionospheric_corrections[0].params[0], 0.1118E-07);
        assert_eq!(nav.ionospheric_corrections[1].params[3], -0.6554E+05);
        assert_eq!(nav.time_corrections.len(), 1);
        assert_eq!(nav.time_corrections[0].ref_week, 2110);

        assert!(decoder.next_ephemeris());
        let eph = decoder.take_ephemeris().unwrap();
        assert_eq!(eph.prn(), PRN::from_str("G12").unwrap());
        assert_eq!(eph.toc(), Epoch::from_str("2020-06-17T02:00:00 GPST").unwrap());
        assert_eq!(eph.clock_bias, -3.120955079794E-04);
        assert_eq!(eph.clock_drift, -2.046363078989E-12);
        match &eph.orbit {
            BroadcastOrbit::GPS(orbit) => {
                assert_eq!(orbit.kepler.iode, 62.0);
                assert_eq!(orbit.kepler.crs, -5.271875000000E+01);
                assert_eq!(orbit.kepler.e, 8.939999085851E-03);
                assert_eq!(orbit.kepler.sqrt_a, 5.153689002991E+03);
                assert_eq!(orbit.kepler.toe, 2.664000000000E+05);
                assert_eq!(orbit.kepler.i0, 9.628259539139E-01);
                assert_eq!(orbit.kepler.idot, -3.839445935734E-10);
                assert_eq!(orbit.week, 2110);
                assert_eq!(orbit.tgd, -1.257285475731E-08);
                assert_eq!(orbit.transmission_time, 2.592180000000E+05);
                assert_eq!(orbit.fit_interval, 4.0);
            },
            _ => panic!("expecting gps parameters"),
        }
        assert!(eph.validate().is_ok());

        assert!(decoder.next_ephemeris());
        let eph = decoder.ephemeris().unwrap();
        assert_eq!(eph.prn(), PRN::from_str("G05").unwrap());
        assert_eq!(eph.toc(), Epoch::from_str("2020-06-17T04:00:00 GPST").unwrap());
        assert_eq!(eph.clock_bias, -1.842323690653E-04);
        assert_eq!(eph.orbit.kepler().unwrap().e, 4.995400726330E-03);

        assert!(!decoder.next_ephemeris());
        assert!(decoder.err().is_none());
    }

    #[test]
    fn v3_mixed() {
        init_logger();
        let decoder = NavDecoder::from_file(test_resource(
            "NAV/V3/BRDC00WRD_R_20201690000_01D_MN.rnx",
        ))
        .unwrap();

        let header = decoder.header().clone();
        assert_eq!(header.version, Version::new(3, 5));
        assert_eq!(header.constellation, Some(SatelliteSystem::Mixed));
        let nav = header.nav.as_ref().unwrap();
        assert_eq!(nav.ionospheric_corrections.len(), 2);
        assert_eq!(nav.ionospheric_corrections[0].kind, "GAL");
        assert_eq!(nav.ionospheric_corrections[1].kind, "GPSA");
        assert_eq!(nav.time_corrections[0].kind, "GPUT");
        assert_eq!(nav.time_corrections[0].ref_time, 233472);

        let ephemerides = decoder.collect::<Result<Vec<_>, _>>().unwrap();
        assert_eq!(ephemerides.len(), 5);

        let prns = ephemerides
            .iter()
            .map(|eph| eph.prn().to_string())
            .collect::<Vec<_>>();
        assert_eq!(prns, vec!["G12", "E11", "C30", "R05", "S36"]);

        for eph in ephemerides.iter() {
            assert!(eph.validate().is_ok(), "{} failed validation", eph.prn());
        }

        match &ephemerides[1].orbit {
            BroadcastOrbit::Galileo(orbit) => {
                assert_eq!(orbit.kepler.e, 1.814579102211E-04);
                assert_eq!(orbit.kepler.sqrt_a, 5.440614606857E+03);
                assert_eq!(orbit.data_sources, 516);
                assert_eq!(orbit.week, 2110);
                assert_eq!(orbit.sisa, 3.12);
                assert_eq!(orbit.transmission_time, 2.60322E+05);
            },
            _ => panic!("expecting galileo parameters"),
        }
        assert_eq!(
            ephemerides[1].toc(),
            Epoch::from_str("2020-06-17T02:10:00 GST").unwrap()
        );

        match &ephemerides[2].orbit {
            BroadcastOrbit::BeiDou(orbit) => {
                assert_eq!(orbit.kepler.e, 6.574306078255E-04);
                assert_eq!(orbit.week, 754);
                assert_eq!(orbit.tgd1, 1.81E-08);
                assert_eq!(orbit.aodc, 1.0);
            },
            _ => panic!("expecting beidou parameters"),
        }
        assert_eq!(
            ephemerides[2].toc(),
            Epoch::from_str("2020-06-17T02:00:00 BDT").unwrap()
        );

        // 3.05: Glonass records span 5 lines
        match &ephemerides[3].orbit {
            BroadcastOrbit::Glonass(orbit) => {
                assert_eq!(orbit.position.0, 1.153593066406E+04);
                assert_eq!(orbit.velocity.1, 2.742698669434E+00);
                assert_eq!(orbit.channel, 1);
                assert_eq!(orbit.status, Some(179));
                assert_eq!(orbit.l1_l2_delay, Some(2.793967723846E-09));
                assert_eq!(orbit.urai, Some(3));
            },
            _ => panic!("expecting glonass parameters"),
        }
        assert_eq!(ephemerides[3].clock_drift_rate, 2.592E+05);

        match &ephemerides[4].orbit {
            BroadcastOrbit::SBAS(orbit) => {
                assert_eq!(orbit.position.0, 4.063672E+04);
                assert_eq!(orbit.health, 63);
                assert_eq!(orbit.ura, 4096.0);
                assert_eq!(orbit.iodn, 16);
            },
            _ => panic!("expecting sbas parameters"),
        }
    }

    #[test]
    fn v3_fast_mode() {
        init_logger();
        let ephemerides = NavDecoder::from_file(test_resource(
            "NAV/V3/BRDC00WRD_R_20201690000_01D_MN.rnx",
        ))
        .unwrap()
        .fast_mode(true)
        .collect::<Result<Vec<_>, _>>()
        .unwrap();

        // cursor remains aligned, whatever the record length
        assert_eq!(ephemerides.len(), 5);
        assert_eq!(ephemerides[4].prn(), PRN::from_str("S36").unwrap());
        assert_eq!(
            ephemerides[4].toc(),
            Epoch::from_str("2020-06-16T23:59:44 GPST").unwrap()
        );
        for eph in ephemerides.iter() {
            assert_eq!(eph.clock_bias, 0.0);
        }
    }

    #[test]
    fn observation_is_not_navigation() {
        init_logger();
        let result = NavDecoder::from_file(test_resource("OBS/V2/delf0010.21o"));
        assert!(matches!(result, Err(Error::UnexpectedType { .. })));
    }
}
